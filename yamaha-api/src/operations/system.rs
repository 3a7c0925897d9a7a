//! System section operations: basic status, power, mute and input selection

use serde::{Deserialize, Serialize};
use xmltree::Element;

use crate::command::{escape_text, Command};
use crate::operations::main_zone::raw_to_volume;
use crate::{xml, ApiError, QueryOperation, YamahaOperation};

/// GetBasicStatus operation
pub struct GetBasicStatusOperation;

/// Request for the basic status query (no parameters)
#[derive(Debug, Clone, Copy, Default)]
pub struct GetBasicStatusRequest;

/// Decoded basic status
///
/// Every field is optional: tags the device did not report leave the
/// corresponding field `None` and the caller keeps its previous value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStatus {
    /// `true` when `Power_Control/Power` is `On`
    pub power_on: Option<bool>,
    /// Normalized volume in `[0, 1]`
    pub volume: Option<f32>,
    /// Mute flag
    pub muted: Option<bool>,
    /// Device-native input token (e.g. `NET RADIO`)
    pub input: Option<String>,
}

impl YamahaOperation for GetBasicStatusOperation {
    type Request = GetBasicStatusRequest;

    const COMMAND: Command = Command::Get;
    const NAME: &'static str = "GetBasicStatus";

    fn build_body(_request: &Self::Request) -> String {
        "<System><Basic_Status>GetParam</Basic_Status></System>".to_string()
    }
}

impl QueryOperation for GetBasicStatusOperation {
    type Response = BasicStatus;

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let basic_status = xml::path(xml, &["System", "Basic_Status"])?;
        let mut status = BasicStatus::default();

        for node in xml::elements(basic_status) {
            match node.name.as_str() {
                "Power_Control" => {
                    status.power_on = Some(xml::child_text(node, "Power").as_deref() == Some("On"));
                }
                "Volume" => {
                    for volume_node in xml::elements(node) {
                        match volume_node.name.as_str() {
                            "Lvl" => {
                                let raw = xml::child_text(volume_node, "Val")
                                    .ok_or_else(|| ApiError::missing("Val"))?;
                                let raw = raw.parse::<i32>().map_err(|_| {
                                    ApiError::ParseError(format!("Invalid volume value: {:?}", raw))
                                })?;
                                status.volume = Some(raw_to_volume(raw));
                            }
                            "Mute" => {
                                status.muted = Some(xml::text(volume_node).as_deref() == Some("On"));
                            }
                            _ => {}
                        }
                    }
                }
                "Input" => {
                    status.input = xml::child_text(node, "Input_Sel");
                }
                _ => {}
            }
        }

        Ok(status)
    }
}

/// SetPower operation
pub struct SetPowerOperation;

/// Request for SetPower: `true` turns on, `false` puts the receiver in standby
#[derive(Debug, Clone, Copy)]
pub struct SetPowerRequest {
    pub on: bool,
}

impl YamahaOperation for SetPowerOperation {
    type Request = SetPowerRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "SetPower";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<System><Power_Control><Power>{}</Power></Power_Control></System>",
            if request.on { "On" } else { "Standby" }
        )
    }
}

/// SetMute operation
pub struct SetMuteOperation;

/// Request for SetMute
#[derive(Debug, Clone, Copy)]
pub struct SetMuteRequest {
    pub muted: bool,
}

impl YamahaOperation for SetMuteOperation {
    type Request = SetMuteRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "SetMute";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<System><Volume><Mute>{}</Mute></Volume></System>",
            if request.muted { "On" } else { "Off" }
        )
    }
}

/// SelectInput operation
pub struct SelectInputOperation;

/// Request for SelectInput, carrying the device-native token
#[derive(Debug, Clone)]
pub struct SelectInputRequest {
    pub token: String,
}

impl YamahaOperation for SelectInputOperation {
    type Request = SelectInputRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "SelectInput";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<System><Input><Input_Sel>{}</Input_Sel></Input></System>",
            escape_text(&request.token)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(xml_str: &str) -> Result<BasicStatus, ApiError> {
        let xml = Element::parse(xml_str.as_bytes()).unwrap();
        GetBasicStatusOperation::parse_response(&xml)
    }

    #[test]
    fn test_basic_status_payload_construction() {
        let payload = GetBasicStatusOperation::build_body(&GetBasicStatusRequest);
        assert_eq!(payload, "<System><Basic_Status>GetParam</Basic_Status></System>");
    }

    #[test]
    fn test_basic_status_response_parsing() {
        let status = parse(
            r#"
            <YAMAHA_AV rsp="GET" RC="0">
                <System>
                    <Basic_Status>
                        <Power_Control><Power>On</Power><Sleep>Off</Sleep></Power_Control>
                        <Volume>
                            <Lvl><Val>30</Val><Exp>0</Exp><Unit></Unit></Lvl>
                            <Mute>Off</Mute>
                        </Volume>
                        <Input><Input_Sel>NET RADIO</Input_Sel></Input>
                        <Sound_Video><Direct><Mode>Off</Mode></Direct></Sound_Video>
                    </Basic_Status>
                </System>
            </YAMAHA_AV>
        "#,
        )
        .unwrap();

        assert_eq!(status.power_on, Some(true));
        assert_eq!(status.volume, Some(0.6));
        assert_eq!(status.muted, Some(false));
        assert_eq!(status.input, Some("NET RADIO".to_string()));
    }

    #[test]
    fn test_basic_status_standby_and_muted() {
        let status = parse(
            r#"<YAMAHA_AV RC="0"><System><Basic_Status>
                <Power_Control><Power>Standby</Power></Power_Control>
                <Volume><Mute>On</Mute></Volume>
            </Basic_Status></System></YAMAHA_AV>"#,
        )
        .unwrap();

        assert_eq!(status.power_on, Some(false));
        assert_eq!(status.muted, Some(true));
        assert_eq!(status.volume, None);
        assert_eq!(status.input, None);
    }

    #[test]
    fn test_basic_status_missing_section() {
        let result = parse(r#"<YAMAHA_AV RC="0"><Main_Zone/></YAMAHA_AV>"#);
        match result {
            Err(ApiError::ParseError(msg)) => assert!(msg.contains("Missing System element")),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_status_invalid_volume() {
        let result = parse(
            r#"<YAMAHA_AV><System><Basic_Status>
                <Volume><Lvl><Val>loud</Val></Lvl></Volume>
            </Basic_Status></System></YAMAHA_AV>"#,
        );
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }

    #[rstest]
    #[case(true, "<System><Power_Control><Power>On</Power></Power_Control></System>")]
    #[case(false, "<System><Power_Control><Power>Standby</Power></Power_Control></System>")]
    fn test_power_payload(#[case] on: bool, #[case] expected: &str) {
        assert_eq!(SetPowerOperation::build_body(&SetPowerRequest { on }), expected);
    }

    #[rstest]
    #[case(true, "<System><Volume><Mute>On</Mute></Volume></System>")]
    #[case(false, "<System><Volume><Mute>Off</Mute></Volume></System>")]
    fn test_mute_payload(#[case] muted: bool, #[case] expected: &str) {
        assert_eq!(SetMuteOperation::build_body(&SetMuteRequest { muted }), expected);
    }

    #[test]
    fn test_select_input_payload() {
        let request = SelectInputRequest {
            token: "NET RADIO".to_string(),
        };
        assert_eq!(
            SelectInputOperation::build_body(&request),
            "<System><Input><Input_Sel>NET RADIO</Input_Sel></Input></System>"
        );
    }
}
