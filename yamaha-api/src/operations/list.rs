//! Menu browsing operations: list info, cursor movement and direct select

use serde::{Deserialize, Serialize};
use xmltree::Element;

use crate::command::Command;
use crate::operations::PLAYER_SECTION;
use crate::{xml, ApiError, QueryOperation, YamahaOperation};

/// Prefix of the line identifiers under `Current_List`
pub const LINE_PREFIX: &str = "Line_";

/// Attribute value marking an entry that cannot be selected
pub const UNSELECTABLE: &str = "Unselectable";

/// Parse a line identifier such as `Line_3` into its number
///
/// Fails when the prefix is missing or the suffix is not a positive integer,
/// rather than silently slicing a wrong substring.
pub fn parse_line_id(id: &str) -> Result<u32, ApiError> {
    let number = id
        .strip_prefix(LINE_PREFIX)
        .ok_or_else(|| ApiError::ParseError(format!("Line identifier {:?} lacks {} prefix", id, LINE_PREFIX)))?;
    match number.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::ParseError(format!("Invalid line number in {:?}", id))),
    }
}

/// A selectable entry of the current menu layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Line identifier as reported by the device, e.g. `Line_2`
    pub id: String,
    /// Display text
    pub text: String,
}

impl MenuEntry {
    /// Numeric line of this entry
    pub fn line(&self) -> Result<u32, ApiError> {
        parse_line_id(&self.id)
    }
}

/// Snapshot of the receiver's on-screen menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuStatus {
    /// `Menu_Status` is `Ready`
    pub ready: bool,
    /// Depth in the menu hierarchy, 1 being the top
    pub layer: u32,
    /// Title of the current layer
    pub name: String,
    pub current_line: u32,
    pub max_line: u32,
    /// Selectable entries in document order
    pub entries: Vec<MenuEntry>,
}

impl MenuStatus {
    /// First entry whose display text equals `text`
    pub fn find(&self, text: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.text == text)
    }
}

/// GetListInfo operation
pub struct GetListInfoOperation;

/// Request for the List_Info query (no parameters)
#[derive(Debug, Clone, Copy, Default)]
pub struct GetListInfoRequest;

impl YamahaOperation for GetListInfoOperation {
    type Request = GetListInfoRequest;

    const COMMAND: Command = Command::Get;
    const NAME: &'static str = "GetListInfo";

    fn build_body(_request: &Self::Request) -> String {
        format!(
            "<{section}><List_Info>GetParam</List_Info></{section}>",
            section = PLAYER_SECTION
        )
    }
}

impl QueryOperation for GetListInfoOperation {
    type Response = MenuStatus;

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let list_info = xml::find(xml, "List_Info").ok_or_else(|| ApiError::missing("List_Info"))?;
        decode_menu(list_info)
    }
}

/// Decode a `List_Info` element
pub fn decode_menu(list_info: &Element) -> Result<MenuStatus, ApiError> {
    let ready = xml::required_text(list_info, "Menu_Status")? == "Ready";
    let layer = xml::required_number(list_info, "Menu_Layer")?;
    let name = xml::required_text(list_info, "Menu_Name")?;
    let current_line = xml::required_number(list_info, "Current_Line")?;
    let max_line = xml::required_number(list_info, "Max_Line")?;
    let current_list = xml::find(list_info, "Current_List").ok_or_else(|| ApiError::missing("Current_List"))?;

    let entries = xml::elements(current_list)
        .filter(|line| xml::child_text(line, "Attribute").as_deref() != Some(UNSELECTABLE))
        .map(|line| MenuEntry {
            id: line.name.clone(),
            text: xml::child_text(line, "Txt").unwrap_or_default(),
        })
        .collect();

    Ok(MenuStatus {
        ready,
        layer,
        name,
        current_line,
        max_line,
        entries,
    })
}

/// Cursor movements understood by `List_Control/Cursor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    Up,
    Down,
    Left,
    Right,
    Select,
    Return,
    ReturnToHome,
}

impl Cursor {
    /// The command text sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::Up => "Up",
            Cursor::Down => "Down",
            Cursor::Left => "Left",
            Cursor::Right => "Right",
            Cursor::Select => "Sel",
            Cursor::Return => "Return",
            Cursor::ReturnToHome => "Return to Home",
        }
    }
}

/// Cursor operation
pub struct CursorOperation;

/// Request for a cursor movement
#[derive(Debug, Clone, Copy)]
pub struct CursorRequest {
    pub cursor: Cursor,
}

impl YamahaOperation for CursorOperation {
    type Request = CursorRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "Cursor";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<{section}><List_Control><Cursor>{cursor}</Cursor></List_Control></{section}>",
            section = PLAYER_SECTION,
            cursor = request.cursor.as_str()
        )
    }
}

/// DirectSelect operation: activate a visible line of the current layer
pub struct DirectSelectOperation;

/// Request for a direct select
#[derive(Debug, Clone, Copy)]
pub struct DirectSelectRequest {
    pub line: u32,
}

impl YamahaOperation for DirectSelectOperation {
    type Request = DirectSelectRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "DirectSelect";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<{section}><List_Control><Direct_Sel>{prefix}{line}</Direct_Sel></List_Control></{section}>",
            section = PLAYER_SECTION,
            prefix = LINE_PREFIX,
            line = request.line
        )
    }
}
