use xmltree::Element;

use crate::command::Command;
use crate::error::ApiError;

/// Base trait for all receiver operations
///
/// An operation knows which verb it uses and how to render its request data
/// as the command fragment that goes inside the `YAMAHA_AV` envelope.
pub trait YamahaOperation {
    /// The request data for this operation
    type Request;

    /// `GET` for queries, `PUT` for commands
    const COMMAND: Command;

    /// Operation name used in log output
    const NAME: &'static str;

    /// Build the command fragment (without envelope) from the request data
    fn build_body(request: &Self::Request) -> String;
}

/// Operations whose response carries data worth decoding
///
/// Commands (`PUT`) are fire-and-forget and do not implement this trait.
pub trait QueryOperation: YamahaOperation {
    /// The decoded response type
    type Response;

    /// Decode the response document
    ///
    /// # Arguments
    /// * `xml` - The `YAMAHA_AV` root of the response, already checked for `RC="0"`
    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError>;
}
