use crate::RawRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the harvest with the first, keyless request.
    Start,
    /// The index answered with a decoded page.
    PageFetched(Vec<RawRow>),
    /// The request exceeded its timeout.
    TimedOut,
    /// Any other transport, status or decoding failure.
    Failed(String),
}
