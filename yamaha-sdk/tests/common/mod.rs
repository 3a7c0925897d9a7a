//! Scripted receivers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use xml_client::mock::MockTransport;
use xml_client::{HttpResponse, TransportError};
use yamaha_sdk::{NavigationConfig, Receiver, ReceiverConfig};

pub const PUT_OK: &str = r#"<YAMAHA_AV rsp="PUT" RC="0"></YAMAHA_AV>"#;

/// Config with no navigation delay
pub fn fast_config() -> ReceiverConfig {
    ReceiverConfig::new("192.168.1.20").with_navigation(NavigationConfig {
        retry_delay: Duration::ZERO,
        ..NavigationConfig::default()
    })
}

pub fn basic_status(power: &str, input: &str, volume_raw: i32, mute: &str) -> String {
    format!(
        r#"<YAMAHA_AV rsp="GET" RC="0"><System><Basic_Status>
            <Power_Control><Power>{power}</Power><Sleep>Off</Sleep></Power_Control>
            <Volume><Lvl><Val>{volume_raw}</Val><Exp>0</Exp><Unit></Unit></Lvl><Mute>{mute}</Mute></Volume>
            <Input><Input_Sel>{input}</Input_Sel><Input_Sel_Item_Info><Title>{input}</Title></Input_Sel_Item_Info></Input>
        </Basic_Status></System></YAMAHA_AV>"#
    )
}

pub const NET_RADIO_PLAY_INFO: &str = r#"<YAMAHA_AV rsp="GET" RC="0"><Player><Play_Info>
    <Feature_Availability>Ready</Feature_Availability>
    <Playback_Info>Play</Playback_Info>
    <Play_Mode><Repeat>All</Repeat><Shuffle>Off</Shuffle></Play_Mode>
    <Play_Time>125</Play_Time>
    <Meta_Info>
        <Station>Radio Paradise</Station>
        <Artist>Miles Davis</Artist>
        <Album>Kind of Blue</Album>
    </Meta_Info>
</Play_Info></Player></YAMAHA_AV>"#;

/// Mutable device that answers status and play-info queries
pub struct StatusDevice {
    pub power: String,
    pub input: String,
    pub volume_raw: i32,
    pub mute: String,
    pub online: bool,
    pub play_info: String,
}

impl Default for StatusDevice {
    fn default() -> Self {
        Self {
            power: "On".to_string(),
            input: "NET RADIO".to_string(),
            volume_raw: 20,
            mute: "Off".to_string(),
            online: true,
            play_info: NET_RADIO_PLAY_INFO.to_string(),
        }
    }
}

impl StatusDevice {
    fn respond(&self, body: &str) -> Result<HttpResponse, TransportError> {
        if !self.online {
            return Err(TransportError::Network("connection timed out".to_string()));
        }
        if body.contains("<Basic_Status>GetParam</Basic_Status>") {
            return Ok(HttpResponse::ok(basic_status(
                &self.power,
                &self.input,
                self.volume_raw,
                &self.mute,
            )));
        }
        if body.contains("<Play_Info>GetParam</Play_Info>") {
            return Ok(HttpResponse::ok(self.play_info.clone()));
        }
        Ok(HttpResponse::ok(PUT_OK))
    }
}

/// Receiver backed by a [`StatusDevice`]
pub fn status_receiver(config: ReceiverConfig) -> (Receiver, Arc<Mutex<StatusDevice>>, Arc<MockTransport>) {
    let device = Arc::new(Mutex::new(StatusDevice::default()));
    let shared = Arc::clone(&device);
    let transport = Arc::new(MockTransport::new(move |body| shared.lock().respond(body)));
    let receiver = Receiver::with_transport(config, transport.clone()).unwrap();
    (receiver, device, transport)
}

/// One entry of a simulated browse menu
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub text: String,
    pub selectable: bool,
    pub children: Vec<MenuNode>,
}

pub fn node(text: &str, children: Vec<MenuNode>) -> MenuNode {
    MenuNode {
        text: text.to_string(),
        selectable: true,
        children,
    }
}

pub fn leaf(text: &str) -> MenuNode {
    node(text, Vec::new())
}

pub fn unselectable(text: &str) -> MenuNode {
    MenuNode {
        text: text.to_string(),
        selectable: false,
        children: Vec::new(),
    }
}

/// Simulated hierarchical menu
///
/// `Return to Home` goes back to layer 1; `Direct_Sel` descends into the
/// chosen entry. After each selection the menu reports `Busy` for
/// `settle_polls` polls.
pub struct MenuDevice {
    pub root: Vec<MenuNode>,
    pub settle_polls: u32,
    pub failing_polls: u32,
    selected: Vec<usize>,
    pending_busy: u32,
    pub polls: u32,
}

impl MenuDevice {
    pub fn new(root: Vec<MenuNode>) -> Self {
        Self {
            root,
            settle_polls: 0,
            failing_polls: 0,
            selected: Vec::new(),
            pending_busy: 0,
            polls: 0,
        }
    }

    fn current(&self) -> &[MenuNode] {
        let mut entries: &[MenuNode] = &self.root;
        for &index in &self.selected {
            entries = &entries[index].children;
        }
        entries
    }

    fn list_info(&mut self) -> String {
        let ready = if self.pending_busy > 0 {
            self.pending_busy -= 1;
            "Busy"
        } else {
            "Ready"
        };
        let lines: String = self
            .current()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let attribute = if entry.selectable { "Container" } else { "Unselectable" };
                format!(
                    "<Line_{n}><Txt>{text}</Txt><Attribute>{attribute}</Attribute></Line_{n}>",
                    n = i + 1,
                    text = entry.text,
                    attribute = attribute
                )
            })
            .collect();
        format!(
            r#"<YAMAHA_AV rsp="GET" RC="0"><Player><List_Info>
                <Menu_Status>{ready}</Menu_Status>
                <Menu_Layer>{layer}</Menu_Layer>
                <Menu_Name>Menu</Menu_Name>
                <Current_List>{lines}</Current_List>
                <Cursor_Position><Current_Line>1</Current_Line><Max_Line>{max}</Max_Line></Cursor_Position>
            </List_Info></Player></YAMAHA_AV>"#,
            ready = ready,
            layer = self.selected.len() + 1,
            lines = lines,
            max = self.current().len()
        )
    }

    fn respond(&mut self, body: &str) -> Result<HttpResponse, TransportError> {
        if body.contains("<List_Info>GetParam</List_Info>") {
            self.polls += 1;
            if self.failing_polls > 0 {
                self.failing_polls -= 1;
                return Err(TransportError::Network("connection reset".to_string()));
            }
            return Ok(HttpResponse::ok(self.list_info()));
        }
        if body.contains("<Cursor>Return to Home</Cursor>") {
            self.selected.clear();
        }
        if let Some(start) = body.find("<Direct_Sel>Line_") {
            let rest = &body[start + "<Direct_Sel>Line_".len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            let line: usize = digits.parse().unwrap();
            self.selected.push(line - 1);
            self.pending_busy = self.settle_polls;
        }
        Ok(HttpResponse::ok(PUT_OK))
    }
}

/// Receiver backed by a [`MenuDevice`]
pub fn menu_receiver(
    config: ReceiverConfig,
    device: MenuDevice,
) -> (Receiver, Arc<Mutex<MenuDevice>>, Arc<MockTransport>) {
    let device = Arc::new(Mutex::new(device));
    let shared = Arc::clone(&device);
    let transport = Arc::new(MockTransport::new(move |body| shared.lock().respond(body)));
    let receiver = Receiver::with_transport(config, transport.clone()).unwrap();
    (receiver, device, transport)
}

/// `Bookmarks > {Jazz > [KCSM, WBGO], Rock}` plus a few other top entries
pub fn bookmarks_tree() -> Vec<MenuNode> {
    vec![
        leaf("Recently Played"),
        node(
            "Bookmarks",
            vec![
                node("Jazz", vec![leaf("KCSM"), leaf("WBGO")]),
                node("Rock", vec![leaf("KEXP")]),
            ],
        ),
        unselectable(""),
        leaf("Search"),
    ]
}

/// Line numbers of every direct select, in order
pub fn direct_selects(transport: &MockTransport) -> Vec<String> {
    transport
        .requests()
        .iter()
        .filter_map(|body| {
            let start = body.find("<Direct_Sel>")? + "<Direct_Sel>".len();
            let end = body.find("</Direct_Sel>")?;
            Some(body[start..end].to_string())
        })
        .collect()
}
