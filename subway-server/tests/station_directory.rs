//! Station directory bootstrap against mock CSV endpoints.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subway_server::cache::CachePolicy;
use subway_server::stations::{StationClient, StationClientConfig, StationDirectory, StationError};

const STATIONS_CSV: &str = "\
Station ID,Complex ID,GTFS Stop ID,Division,Line,Stop Name,Borough,Daytime Routes,Structure,GTFS Latitude,GTFS Longitude
1,1,R01,BMT,Astoria,Astoria-Ditmars Blvd,Q,N W,Elevated,40.775036,-73.912034
2,2,R03,BMT,Astoria,Astoria Blvd,Q,N W,Elevated,40.770258,-73.917843
167,167,A27,IND,8th Av - Fulton St,42 St-Port Authority Bus Terminal,M,A C E,Subway,40.757308,-73.989735
";

const ROUTES_CSV: &str = "\
Station ID,GTFS Stop ID,Daytime Routes
1,R01,N W
167,A27,A C E
";

fn client(server: &MockServer) -> StationClient {
    StationClient::new(
        StationClientConfig::new()
            .with_stations_url(format!("{}/stations.csv", server.uri()))
            .with_routes_url(format!("{}/routes.csv", server.uri())),
    )
    .unwrap()
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn policy() -> CachePolicy {
    CachePolicy::new(Duration::from_secs(60), 1)
}

#[tokio::test]
async fn loads_stations_with_routes() {
    let server = MockServer::start().await;
    serve(&server, "/stations.csv", 200, STATIONS_CSV).await;
    serve(&server, "/routes.csv", 200, ROUTES_CSV).await;

    let stations = client(&server).fetch_directory().await.unwrap();
    assert_eq!(stations.len(), 3);
    assert_eq!(stations[0].routes, vec!["N", "W"]);
    assert!(stations[1].routes.is_empty());
    assert_eq!(stations[2].routes, vec!["A", "C", "E"]);
}

#[tokio::test]
async fn missing_route_mapping_is_not_fatal() {
    let server = MockServer::start().await;
    serve(&server, "/stations.csv", 200, STATIONS_CSV).await;
    serve(&server, "/routes.csv", 404, "not found").await;

    let stations = client(&server).fetch_directory().await.unwrap();
    assert_eq!(stations.len(), 3);
    assert!(stations.iter().all(|s| s.routes.is_empty()));
}

#[tokio::test]
async fn bootstrap_fails_without_stations() {
    let server = MockServer::start().await;
    serve(&server, "/stations.csv", 500, "").await;

    let err = StationDirectory::bootstrap(client(&server), &policy())
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        StationError::Status {
            csv: "stations",
            status: 500
        }
    ));
}

#[tokio::test]
async fn bootstrap_rejects_empty_directory() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/stations.csv",
        200,
        "GTFS Stop ID,Stop Name,GTFS Latitude,GTFS Longitude\n",
    )
    .await;

    let err = StationDirectory::bootstrap(client(&server), &policy())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, StationError::Empty));
}

#[tokio::test]
async fn failed_refresh_keeps_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stations.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATIONS_CSV))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, "/routes.csv", 200, ROUTES_CSV).await;

    let directory = StationDirectory::bootstrap(client(&server), &policy()).await.unwrap();
    assert_eq!(directory.snapshot().await.len(), 3);

    // The stations mock is exhausted; further downloads get 404.
    assert!(directory.refresh().await.is_err());
    let snapshot = directory.snapshot().await;
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.by_id("A27").unwrap().routes, vec!["A", "C", "E"]);
}

#[tokio::test]
async fn expired_snapshot_refreshes_in_background() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stations.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATIONS_CSV))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, "/routes.csv", 200, ROUTES_CSV).await;

    let short = CachePolicy::new(Duration::from_millis(50), 1);
    let directory = StationDirectory::bootstrap(client(&server), &short).await.unwrap();

    let updated = format!("{STATIONS_CSV}400,400,R05,BMT,Astoria,39 Av-Dutch Kills,Q,N W,Elevated,40.752882,-73.932755\n");
    serve(&server, "/stations.csv", 200, &updated).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Expired: the old snapshot is served while the refresh runs.
    assert_eq!(directory.snapshot().await.len(), 3);

    let mut refreshed = 0;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        refreshed = directory.snapshot().await.len();
        if refreshed == 4 {
            break;
        }
    }
    assert_eq!(refreshed, 4);
}

#[tokio::test]
async fn failing_upstream_is_retried_once_per_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stations.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATIONS_CSV))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, "/stations.csv", 503, "").await;
    serve(&server, "/routes.csv", 200, ROUTES_CSV).await;

    let ttl = CachePolicy::new(Duration::from_millis(300), 1);
    let directory = StationDirectory::bootstrap(client(&server), &ttl).await.unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;

    for _ in 0..10 {
        assert_eq!(directory.snapshot().await.len(), 3);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let downloads = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/stations.csv")
        .count();
    // Bootstrap plus a single failed refresh.
    assert_eq!(downloads, 2);
}
