//! Named-path helpers over `xmltree` documents
//!
//! Responses are navigated by tag name rather than by position, so a missing
//! node surfaces as [`ApiError::ParseError`] instead of a wrong value.

use xmltree::Element;

use crate::command::ROOT_ELEMENT;
use crate::error::{ApiError, Result};

/// Parse a response body into an element tree
pub fn parse_document(text: &str) -> Result<Element> {
    let root = Element::parse(text.as_bytes())?;
    if root.name != ROOT_ELEMENT {
        return Err(ApiError::ParseError(format!(
            "Unexpected root element {}, expected {}",
            root.name, ROOT_ELEMENT
        )));
    }
    Ok(root)
}

/// Fail with [`ApiError::ResponseCode`] when the root carries `RC != 0`
///
/// Documents without an `RC` attribute are accepted.
pub fn check_return_code(root: &Element) -> Result<()> {
    match root.attributes.get("RC").map(|rc| rc.trim()) {
        None | Some("0") => Ok(()),
        Some(rc) => {
            let code = rc
                .parse::<u16>()
                .map_err(|_| ApiError::ParseError(format!("Invalid RC attribute: {}", rc)))?;
            Err(ApiError::ResponseCode(code))
        }
    }
}

/// Direct child by name
pub fn child<'a>(element: &'a Element, name: &str) -> Result<&'a Element> {
    element.get_child(name).ok_or_else(|| ApiError::missing(name))
}

/// Walk a sequence of child names from `element`
pub fn path<'a>(element: &'a Element, names: &[&str]) -> Result<&'a Element> {
    names
        .iter()
        .try_fold(element, |current, name| child(current, name))
}

/// Child elements in document order
pub fn elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| node.as_element())
}

/// Trimmed text of an element, `None` when empty
pub fn text(element: &Element) -> Option<String> {
    element
        .get_text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Trimmed text of a direct child
pub fn child_text(element: &Element, name: &str) -> Option<String> {
    element.get_child(name).and_then(text)
}

/// First element named `name` at any depth below `element`, depth-first
pub fn find<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    elements(element).find_map(|e| {
        if e.name == name {
            Some(e)
        } else {
            find(e, name)
        }
    })
}

/// Text of the first descendant named `name`, failing when it is absent
pub fn required_text(element: &Element, name: &str) -> Result<String> {
    let node = find(element, name).ok_or_else(|| ApiError::missing(name))?;
    Ok(text(node).unwrap_or_default())
}

/// Parse the text of the first descendant named `name`
pub fn required_number<T: std::str::FromStr>(element: &Element, name: &str) -> Result<T> {
    let value = required_text(element, name)?;
    value
        .parse::<T>()
        .map_err(|_| ApiError::ParseError(format!("Invalid {} value: {:?}", name, value)))
}
