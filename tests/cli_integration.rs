//! Integration tests for the CLI driver
//!
//! Runs whole invocations against in-memory output buffers, with range
//! files on disk and the online resolvers pointed at mock servers.

use clap::Parser;
use nodeip_check::domain::ResolverKind;
use nodeip_check::{build_resolvers, Args, CheckError, CliDriver, Config};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NODES: &str = "2024-01-01\n192.168.1.0/24\n";

fn config(resolvers: Vec<ResolverKind>) -> Config {
    Config {
        version: "it".to_string(),
        embedded_nodes: NODES,
        resolvers,
        geoip_path: "/nonexistent/GeoLite2-City.mmdb".to_string(),
        ip2region_v4_path: "/nonexistent/ip2region_v4.xdb".to_string(),
        ip2region_v6_path: "/nonexistent/ip2region_v6.xdb".to_string(),
        vore_api_url: "http://127.0.0.1:9/api/IPdata".to_string(),
        mir6_api_url: "http://127.0.0.1:9/api/ip".to_string(),
        ..Config::default()
    }
}

async fn invoke(cfg: Config, argv: &[&str]) -> (Result<(), CheckError>, String, String) {
    let mut full = vec!["checknodeip"];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).unwrap();

    let resolvers = build_resolvers(&cfg);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = CliDriver::new(cfg, resolvers)
        .run(args, &mut out, &mut err)
        .await;
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn range_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_node_ip_reports_yes() {
    let (result, out, _) = invoke(config(Vec::new()), &["-a", "192.168.1.10"]).await;
    assert!(result.is_ok());
    assert!(out.ends_with("Node IP:      [ Yes ]\n"));
}

#[tokio::test]
async fn test_other_ip_reports_no() {
    let (result, out, _) = invoke(config(Vec::new()), &["-a", "1.2.3.4"]).await;
    assert!(result.is_ok());
    assert!(out.contains("Node IP:      [ No ]"));
}

#[tokio::test]
async fn test_v4_mapped_ipv6_matches_ipv4_list() {
    let (result, out, _) = invoke(config(Vec::new()), &["-a", "::ffff:192.168.1.10"]).await;
    assert!(result.is_ok());
    assert!(out.contains("IP:           ::ffff:192.168.1.10\n"));
    assert!(out.ends_with("Node IP:      [ Yes ]\n"));
}

#[tokio::test]
async fn test_ipv6_against_ipv4_list_reports_no() {
    let (result, out, _) = invoke(config(Vec::new()), &["-a", "2001:db8::1"]).await;
    assert!(result.is_ok());
    assert!(out.ends_with("Node IP:      [ No ]\n"));
}

#[tokio::test]
async fn test_padded_address_is_rejected() {
    let (result, out, _) = invoke(config(Vec::new()), &["-a", " 192.168.1.10"]).await;
    assert_eq!(result.unwrap_err().status(), 64);
    assert!(!out.contains("Node IP:"));
}

#[tokio::test]
async fn test_range_file_overrides_embedded_list() {
    let file = range_file("2025-02-03\r\n10.0.0.0/24\r\n\r\n");
    let path = file.path().to_str().unwrap();

    let (result, out, _) = invoke(config(Vec::new()), &["-f", path, "-a", "10.0.0.5"]).await;
    assert!(result.is_ok());
    assert!(out.contains("Node IPs Update At:     2025-02-03"));
    assert!(out.ends_with("Node IP:      [ Yes ]\n"));

    // the embedded range is no longer active
    let (_, out, _) = invoke(config(Vec::new()), &["-f", path, "-a", "192.168.1.10"]).await;
    assert!(out.contains("Node IP:      [ No ]"));
}

#[tokio::test]
async fn test_print_list_from_range_file() {
    let file = range_file("2025-02-03\n10.0.0.5/24\n2001:db8::/32\n172.16.0.0/12\n");
    let path = file.path().to_str().unwrap();

    let (result, out, _) = invoke(config(Vec::new()), &["-p", "-f", path, "-a", "bogus"]).await;
    assert!(result.is_ok());
    let listed: Vec<&str> = out
        .lines()
        .skip_while(|l| *l != "Node IP CIDRs:")
        .skip(1)
        .collect();
    assert_eq!(
        listed,
        vec!["   1) 10.0.0.0/24", "   2) 2001:db8::/32", "   3) 172.16.0.0/12"]
    );
}

#[tokio::test]
async fn test_broken_range_file_aborts_run() {
    let file = range_file("2025-02-03\n10.0.0.0/24\nnope\n");
    let path = file.path().to_str().unwrap();

    let (result, out, err) = invoke(config(Vec::new()), &["-f", path, "-a", "10.0.0.5"]).await;
    let e = result.unwrap_err();
    assert_eq!(e.status(), 65);
    assert!(err.contains("invalid CIDR \"nope\" on line 3"));
    assert!(!out.contains("Node IP:"));
}

#[tokio::test]
async fn test_bad_date_in_range_file_aborts_run() {
    let file = range_file("yesterday\n10.0.0.0/24\n");
    let path = file.path().to_str().unwrap();

    let (result, _, err) = invoke(config(Vec::new()), &["-f", path, "-p"]).await;
    assert_eq!(result.unwrap_err().status(), 65);
    assert!(err.contains("invalid date line \"yesterday\""));
}

#[tokio::test]
async fn test_missing_range_file_aborts_run() {
    let (result, out, err) = invoke(
        config(Vec::new()),
        &["-f", "/nonexistent/nodes.txt", "-a", "10.0.0.5"],
    )
    .await;
    assert_eq!(result.unwrap_err().status(), 66);
    assert!(err.contains("failed to read range file /nonexistent/nodes.txt"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_failing_resolvers_do_not_stop_the_report() {
    let cfg = config(vec![
        ResolverKind::GeoLite2,
        ResolverKind::Ip2Region,
        ResolverKind::Vore,
        ResolverKind::Mir6,
    ]);
    let (result, out, _) = invoke(cfg, &["-a", "192.168.1.10"]).await;
    assert!(result.is_ok());
    assert!(out.contains("Location[1]:  unknown\n"));
    assert!(out.contains("Location[2]:  failed to create ip2region service:"));
    assert!(out.contains("Location[3]:  unknown\n"));
    assert!(out.contains("Location[4]:  unknown\n"));
    assert!(out.ends_with("Node IP:      [ Yes ]\n"));
}

#[tokio::test]
async fn test_online_resolvers_fill_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/IPdata"))
        .and(query_param("ip", "114.114.114.114"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "SUCCESS",
            "ipinfo": {"type": "ipv4", "text": "114.114.114.114", "cnip": true},
            "ipdata": {"info1": "江苏省", "info2": "南京市", "info3": "", "isp": "114DNS"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/ip"))
        .and(query_param("ip", "114.114.114.114"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "success",
            "data": {"country": "中国", "countryCode": "CN", "province": "江苏省",
                     "city": "南京市", "isp": "114DNS"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cfg = Config {
        vore_api_url: format!("{}/api/IPdata", mock_server.uri()),
        mir6_api_url: format!("{}/api/ip", mock_server.uri()),
        ..config(vec![ResolverKind::Vore, ResolverKind::Mir6])
    };

    let (result, out, _) = invoke(cfg, &["-a", "114.114.114.114"]).await;
    assert!(result.is_ok());
    assert!(out.contains("IP:           114.114.114.114\n"));
    assert!(out.contains("Location[1]:  中国|江苏省|南京市|114DNS|vore-api|online\n"));
    assert!(out.contains("Location[2]:  中国|江苏省|南京市|114DNS|CN|mir6-api|online\n"));
    assert!(out.contains("Node IP:      [ No ]"));
}

#[tokio::test]
async fn test_invalid_ip_skips_resolvers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cfg = Config {
        vore_api_url: format!("{}/api/IPdata", mock_server.uri()),
        ..config(vec![ResolverKind::Vore])
    };

    let (result, out, err) = invoke(cfg, &["-a", "1.2.3.999"]).await;
    assert_eq!(result.unwrap_err().status(), 64);
    assert!(err.contains("IP address format error"));
    assert!(!out.contains("Location["));
}

#[tokio::test]
async fn test_no_address_prints_usage() {
    let (result, _, err) = invoke(config(Vec::new()), &[]).await;
    assert!(matches!(result, Err(CheckError::MissingAddress)));
    assert!(err.contains("-a <IP>"));
    assert!(err.contains("checknodeip -p"));
}

#[tokio::test]
async fn test_default_embedded_list_loads() {
    let cfg = Config {
        resolvers: Vec::new(),
        ..Config::default()
    };
    let (result, out, _) = invoke(cfg, &["-p"]).await;
    assert!(result.is_ok());
    assert!(out.contains("Node IP CIDRs:\n   1) "));
}
