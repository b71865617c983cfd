use eyre::Result;
use maintenance_core::{MaintenanceRequest, RequestPayload};
use maintenance_tests::TestCtx;

/// Creates a request and checks that creation succeeded.
#[allow(unused)]
pub async fn create(ctx: &TestCtx, asset: &str, description: &str) -> Result<MaintenanceRequest> {
    let response = ctx
        .api
        .create_request(&RequestPayload::new(asset, description, ""))
        .await?;
    assert_eq!(
        response.status, 201,
        "Creating a valid request must answer with 201 Created."
    );
    Ok(response.result?)
}

/// Asserts that every entry of `list` is at least as new as its successor.
#[allow(unused)]
pub fn assert_newest_first(list: &[MaintenanceRequest]) {
    for pair in list.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "Requests must be listed newest first, but {} precedes {}.",
            pair[0].id,
            pair[1].id,
        );
    }
}
