use reqwest::StatusCode;

use crate::helpers::TestApi;

#[tokio::test]
async fn health_works() {
    let api = TestApi::spawn().await;

    let response = api.get_health().await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}
