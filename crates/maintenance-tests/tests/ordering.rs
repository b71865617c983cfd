use eyre::Result;
use maintenance_tests::TestCtxBuilder;

mod util;

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_demo_data() -> Result<()> {
    let ctx = TestCtxBuilder::new().with_demo_data().build().await?;

    let list = ctx.api.list_requests().await?.result?;
    assert_eq!(list.len(), 2, "Startup must seed two demonstration requests.");
    assert!(list.iter().any(|r| r.asset.contains("HVAC")));
    assert!(list.iter().any(|r| r.asset.contains("Elevator")));
    util::assert_newest_first(&list);

    ctx.finish().await
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_empty_list() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let response = ctx.api.list_requests().await?;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"[]");

    ctx.finish().await
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_newest_first() -> Result<()> {
    let ctx = TestCtxBuilder::new().with_demo_data().build().await?;

    let mut created = Vec::new();
    for i in 0..10 {
        created.push(util::create(&ctx, &format!("Room {i}"), "Light out").await?.id);
    }
    ctx.api.delete_request(created[4]).await?.result?;

    let list = ctx.api.list_requests().await?.result?;
    assert_eq!(list.len(), 11);
    util::assert_newest_first(&list);

    // Fresh requests outrank the backdated demonstration data, and requests
    // created within the same clock tick are ordered by descending id.
    let ids: Vec<_> = list.iter().map(|r| r.id).collect();
    let mut expected: Vec<_> = created
        .iter()
        .rev()
        .copied()
        .filter(|&id| id != created[4])
        .collect();
    expected.extend([2, 1]);
    assert_eq!(ids, expected);

    // Updating a request does not move it.
    ctx.api
        .update_request(
            created[0],
            &serde_json::json!({"asset": "Room 0", "description": "Fixed"}),
        )
        .await?
        .result?;
    let after_update: Vec<_> = ctx
        .api
        .list_requests()
        .await?
        .result?
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(after_update, ids);

    ctx.finish().await
}
