//! End-to-end tests of the receiver client over real HTTP
//!
//! A mockito server stands in for the receiver's control endpoint so the
//! full encode, POST and decode path is exercised.

use mockito::{Matcher, Server};
use yamaha_api::operations::list::GetListInfoRequest;
use yamaha_api::operations::main_zone::SetVolumeRequest;
use yamaha_api::operations::system::GetBasicStatusRequest;
use yamaha_api::operations::{GetBasicStatusOperation, GetListInfoOperation, SetVolumeOperation};
use yamaha_api::{ApiError, YamahaClient};

const BASIC_STATUS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<YAMAHA_AV rsp="GET" RC="0">
  <System>
    <Basic_Status>
      <Power_Control><Power>On</Power></Power_Control>
      <Volume><Lvl><Val>12</Val><Exp>0</Exp><Unit></Unit></Lvl><Mute>On</Mute></Volume>
      <Input><Input_Sel>CD</Input_Sel></Input>
    </Basic_Status>
  </System>
</YAMAHA_AV>"#;

#[test]
fn test_basic_status_over_http() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/YamahaRemoteControl/ctrl")
        .match_body(Matcher::Regex(r#"<YAMAHA_AV cmd="GET"><System><Basic_Status>GetParam"#.to_string()))
        .with_status(200)
        .with_body(BASIC_STATUS)
        .create();

    let client = YamahaClient::new(&server.url());
    let status = client
        .execute::<GetBasicStatusOperation>(&GetBasicStatusRequest)
        .unwrap();

    mock.assert();
    assert_eq!(status.power_on, Some(true));
    assert_eq!(status.volume, Some(0.24));
    assert_eq!(status.muted, Some(true));
    assert_eq!(status.input.as_deref(), Some("CD"));
}

#[test]
fn test_set_volume_over_http() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/YamahaRemoteControl/ctrl")
        .match_body(Matcher::Regex("<Val>40</Val>".to_string()))
        .with_status(200)
        .with_body(r#"<YAMAHA_AV rsp="PUT" RC="0"><Main_Zone><Volume><Lvl></Lvl></Volume></Main_Zone></YAMAHA_AV>"#)
        .create();

    let client = YamahaClient::new(&server.url());
    let request = SetVolumeRequest::from_volume(0.8).unwrap();
    let response = client.send::<SetVolumeOperation>(&request).unwrap();

    mock.assert();
    assert!(response.is_success());
}

#[test]
fn test_error_status_with_decodable_body() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/YamahaRemoteControl/ctrl")
        .with_status(503)
        .with_body(BASIC_STATUS)
        .create();

    // The body is still decoded best-effort
    let client = YamahaClient::new(&server.url());
    let status = client
        .execute::<GetBasicStatusOperation>(&GetBasicStatusRequest)
        .unwrap();
    assert_eq!(status.input.as_deref(), Some("CD"));
}

#[test]
fn test_menu_query_with_error_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/YamahaRemoteControl/ctrl")
        .with_status(200)
        .with_body(r#"<YAMAHA_AV rsp="GET" RC="3"></YAMAHA_AV>"#)
        .create();

    let client = YamahaClient::new(&server.url());
    let result = client.execute::<GetListInfoOperation>(&GetListInfoRequest);
    assert_eq!(result.unwrap_err(), ApiError::ResponseCode(3));
}
