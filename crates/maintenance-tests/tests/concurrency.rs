use std::collections::HashSet;

use eyre::Result;
use futures::future::join_all;
use maintenance_core::{RequestPayload, STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};
use maintenance_tests::TestCtxBuilder;
use nanorand::Rng;

mod util;

#[tokio::test]
#[ntest::timeout(20_000)]
async fn test_concurrent_creates_get_distinct_ids() -> Result<()> {
    let ctx = TestCtxBuilder::new()
        .with_worker_threads(8)
        .build()
        .await?;

    let apis: Vec<_> = (0..8).map(|_| ctx.api.clone()).collect();
    let creates = (0..400).map(|i| {
        let api = &apis[i % apis.len()];
        async move {
            api.create_request(&RequestPayload::new(format!("Asset {i}"), "Broken", ""))
                .await
        }
    });
    let mut ids = HashSet::new();
    for response in join_all(creates).await {
        let created = response?.result?;
        assert!(ids.insert(created.id), "Id {} was handed out twice.", created.id);
    }
    drop(apis);

    assert_eq!(ids, (1..=400).collect::<HashSet<u64>>());
    let list = ctx.api.list_requests().await?.result?;
    assert_eq!(list.len(), 400);
    util::assert_newest_first(&list);

    ctx.finish().await
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn test_mixed_load_keeps_records_consistent() -> Result<()> {
    let ctx = TestCtxBuilder::new()
        .with_demo_data()
        .with_worker_threads(4)
        .build()
        .await?;

    let base = util::create(&ctx, "Boiler", "Leaking").await?;
    let base = &base;
    let statuses = [STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

    let apis: Vec<_> = (0..4).map(|_| ctx.api.clone()).collect();
    let ops = (0..300).map(|i| {
        let api = &apis[i % apis.len()];
        let roll = nanorand::tls_rng().generate_range(0_u32..3);
        let status = statuses[i % statuses.len()];
        async move {
            match roll {
                0 => {
                    // Writers always pair asset and description.
                    let payload =
                        RequestPayload::new(format!("Boiler {i}"), format!("Leak {i}"), status);
                    let updated = api.update_request(base.id, &payload).await?.result?;
                    assert_eq!(updated.id, base.id);
                    assert_eq!(updated.created_at, base.created_at);
                }
                1 => {
                    let read = api.get_request(base.id).await?.result?;
                    assert_eq!(read.created_at, base.created_at);
                    let suffix = read.asset.trim_start_matches("Boiler");
                    if !suffix.is_empty() {
                        assert_eq!(
                            read.description,
                            format!("Leak{suffix}"),
                            "A read must never observe half of an update."
                        );
                    }
                }
                _ => {
                    let list = api.list_requests().await?.result?;
                    util::assert_newest_first(&list);
                }
            }
            eyre::Ok(())
        }
    });
    for result in join_all(ops).await {
        result?;
    }
    drop(apis);

    let last = ctx.api.get_request(base.id).await?.result?;
    assert_eq!(last.id, base.id);
    assert_eq!(last.created_at, base.created_at);
    assert_eq!(ctx.store().len(), 3);

    ctx.finish().await
}
