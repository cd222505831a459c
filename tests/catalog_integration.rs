use better_times::Error;
use better_times::catalog::{list_venues, load_activity_selection};
use better_times::client::BetterClient;
use mockito::Server;

const ORIGIN: &str = "https://bookings.better.org.uk";

#[tokio::test]
async fn test_venues_are_listed_with_origin_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/activities/venues")
        .match_header("origin", ORIGIN)
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"name": "Central Leisure Centre", "slug": "centre", "id": 12},
                {"name": "Riverside Pool", "slug": "riverside", "id": 13}
            ]}"#,
        )
        .create_async()
        .await;

    let client = BetterClient::new(&server.url(), ORIGIN).unwrap();
    let venues = list_venues(&client).await.unwrap();

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[1].slug, "riverside");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_404_is_a_status_error() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/activities/venues")
        .with_status(404)
        .create_async()
        .await;

    let client = BetterClient::new(&server.url(), ORIGIN).unwrap();
    let err = list_venues(&client).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_configured_origin_is_what_gets_sent() {
    let mut server = Server::new_async().await;
    // Only answers requests carrying the bookings origin
    let venues = server
        .mock("GET", "/api/activities/venues")
        .match_header("origin", ORIGIN)
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .expect(1)
        .create_async()
        .await;

    let right = BetterClient::new(&server.url(), ORIGIN).unwrap();
    assert!(list_venues(&right).await.unwrap().is_empty());

    // mockito answers unmatched requests with 501
    let wrong = BetterClient::new(&server.url(), "https://example.com").unwrap();
    let err = list_venues(&wrong).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 501, .. }));

    venues.assert_async().await;
}

#[tokio::test]
async fn test_activity_selection_fills_and_sorts() {
    let mut server = Server::new_async().await;
    let _venue = server
        .mock("GET", "/api/activities/venues/centre")
        .with_status(200)
        .with_body(r#"{"data": {"name": "Central Leisure Centre", "slug": "centre"}}"#)
        .create_async()
        .await;
    let _categories = server
        .mock("GET", "/api/activities/venue/centre/categories")
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"name": "Swimming", "slug": "swimming"},
                {"name": "Badminton", "slug": "badminton"}
            ]}"#,
        )
        .create_async()
        .await;
    let _swimming = server
        .mock("GET", "/api/activities/venue/centre/categories/swimming")
        .with_status(200)
        .with_body(
            r#"{"data": {"name": "Swimming", "slug": "swimming", "children": [
                {"name": "Lane Swimming", "slug": "lane-swimming"},
                {"name": "Family Swim", "slug": "family-swim"}
            ]}}"#,
        )
        .create_async()
        .await;
    let _badminton = server
        .mock("GET", "/api/activities/venue/centre/categories/badminton")
        .with_status(200)
        .with_body(r#"{"data": {"name": "Badminton 40min", "slug": "badminton"}}"#)
        .create_async()
        .await;

    let client = BetterClient::new(&server.url(), ORIGIN).unwrap();
    let selection = load_activity_selection(&client, "centre", 4).await.unwrap();

    assert_eq!(selection.venue.name, "Central Leisure Centre");
    assert_eq!(selection.activities.len(), 2);
    // Childless category is named after its summary, not its details
    assert_eq!(selection.activities[0].name, "Badminton");
    assert_eq!(selection.activities[0].children[0].slug, "badminton");
    assert_eq!(selection.activities[1].name, "Swimming");
    assert_eq!(selection.activities[1].children.len(), 2);
}

#[tokio::test]
async fn test_activity_selection_fails_when_a_category_fails() {
    let mut server = Server::new_async().await;
    let _venue = server
        .mock("GET", "/api/activities/venues/centre")
        .with_status(200)
        .with_body(r#"{"data": {"name": "Central Leisure Centre", "slug": "centre"}}"#)
        .create_async()
        .await;
    let _categories = server
        .mock("GET", "/api/activities/venue/centre/categories")
        .with_status(200)
        .with_body(r#"{"data": [{"name": "Gym", "slug": "gym"}]}"#)
        .create_async()
        .await;
    let _gym = server
        .mock("GET", "/api/activities/venue/centre/categories/gym")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = BetterClient::new(&server.url(), ORIGIN).unwrap();
    let err = load_activity_selection(&client, "centre", 4)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Aggregate(inner) if matches!(*inner, Error::Decode { what: "activity", .. })
    ));
}
