//! Server implementation

#![warn(missing_docs)]

mod http;

use std::io;
use std::thread;

use eyre::{eyre, Result, WrapErr};
use maintenance_core::{Config, RequestHandler};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line options
#[derive(Debug)]
struct Opts {
    /// Configuration of the maintenance request service
    config: Config,

    /// Port for the HTTP server to listen on
    port: u16,
    /// Address for the HTTP server to bind to
    host: String,
    /// Number of worker threads accepting requests
    worker_threads: u32,
}

impl Opts {
    fn from_args() -> Self {
        let mut opts = Opts {
            port: 8080,
            host: String::from("127.0.0.1"),
            config: Config::default(),
            worker_threads: 8,
        };

        let mut option: Option<String> = None;
        for arg in std::env::args().skip(1) {
            if let Some(opt) = option {
                match opt.as_str() {
                    "-port" => opts.port = parse_arg(&opt, &arg, "a decimal u16"),
                    "-host" => opts.host = arg,
                    "-worker-threads" => {
                        opts.worker_threads = parse_arg(&opt, &arg, "a positive decimal u32");
                        if opts.worker_threads == 0 {
                            exit_with_usage(&format!("{opt} takes a positive decimal u32"));
                        }
                    }
                    _ => exit_with_usage(&format!("unknown option {opt}")),
                }
                option = None;
            } else {
                match arg.as_str() {
                    "-no-seed" => opts.config.seed_demo_data = false,
                    _ => option = Some(arg),
                }
            }
        }
        if let Some(opt) = option {
            exit_with_usage(&format!("leftover option {opt}"));
        }

        opts
    }
}

fn parse_arg<T: std::str::FromStr>(opt: &str, arg: &str, expected: &str) -> T {
    arg.parse()
        .unwrap_or_else(|_| exit_with_usage(&format!("{opt} takes {expected}")))
}

fn exit_with_usage(msg: &str) -> ! {
    eprintln!("Error: {msg}");
    eprintln!("Usage: maintenance-server [-port <u16>] [-host <addr>] [-worker-threads <n>] [-no-seed]");
    std::process::exit(1);
}

fn http_loop<H: RequestHandler>(server: &tiny_http::Server, handler: &H) {
    loop {
        let rq = match server.recv() {
            Ok(rq) => rq,
            Err(err) => {
                error!("HTTP receive failed: {err}");
                continue;
            }
        };
        if let Some(rq) = http::parse(rq) {
            handler.handle(rq);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = Opts::from_args();

    let server = tiny_http::Server::http((opts.host.as_str(), opts.port))
        .map_err(|err| eyre!("could not listen on {}:{}: {err}", opts.host, opts.port))?;
    info!(host = %opts.host, port = opts.port, workers = opts.worker_threads, "listening");

    let service = maintenance_store::launch(&opts.config);
    let (server, service) = (&server, &service);

    thread::scope(|s| {
        let spawned = spawn_workers(opts.worker_threads, |i| {
            thread::Builder::new()
                .name(format!("worker_{i}"))
                .spawn_scoped(s, move || http_loop(server, service))
                .map(drop)
        });
        // Workers never return, so leaving the scope would wait forever.
        if let Err(err) = spawned {
            error!("{err:#}");
            std::process::exit(1);
        }
    });
    Ok(())
}

/// Start `count` workers with `spawn`, stopping at the first failure
fn spawn_workers(count: u32, mut spawn: impl FnMut(u32) -> io::Result<()>) -> Result<()> {
    for i in 0..count {
        spawn(i).wrap_err_with(|| format!("could not spawn worker thread {i}"))?;
    }
    Ok(())
}
