use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::headers::ResponseHeaders;
use crate::HxError;

/// How htmx places the returned content relative to the target element.
///
/// The wire form is produced by [`SwapType::as_str`] (and `Display`), and read
/// back with [`str::parse`]. Parsing an unknown value is an error; callers that
/// want htmx's own fallback can use `unwrap_or_default()`, which yields
/// [`SwapType::InnerHtml`].
///
/// ```
/// use actix_hx::SwapType;
///
/// assert_eq!("outerHTML".parse::<SwapType>().unwrap(), SwapType::OuterHtml);
/// assert!("sideways".parse::<SwapType>().is_err());
/// assert_eq!(
///     "sideways".parse::<SwapType>().unwrap_or_default(),
///     SwapType::InnerHtml
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwapType {
    #[default]
    InnerHtml,
    OuterHtml,
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    AfterEnd,
    Delete,
    None,
}

impl SwapType {
    pub const ALL: [SwapType; 8] = [
        SwapType::InnerHtml,
        SwapType::OuterHtml,
        SwapType::BeforeBegin,
        SwapType::AfterBegin,
        SwapType::BeforeEnd,
        SwapType::AfterEnd,
        SwapType::Delete,
        SwapType::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapType::InnerHtml => "innerHTML",
            SwapType::OuterHtml => "outerHTML",
            SwapType::BeforeBegin => "beforebegin",
            SwapType::AfterBegin => "afterbegin",
            SwapType::BeforeEnd => "beforeend",
            SwapType::AfterEnd => "afterend",
            SwapType::Delete => "delete",
            SwapType::None => "none",
        }
    }
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapType {
    type Err = HxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwapType::ALL
            .into_iter()
            .find(|swap| swap.as_str() == s)
            .ok_or_else(|| HxError::InvalidSwap(s.to_string()))
    }
}

impl Serialize for SwapType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Selects which of the three trigger headers an event is written to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerType {
    /// `HX-Trigger`: fired as soon as the response is received.
    #[default]
    Standard,
    /// `HX-Trigger-After-Settle`: fired after the settle step.
    AfterSettle,
    /// `HX-Trigger-After-Swap`: fired after the swap step.
    AfterSwap,
}

impl TriggerType {
    pub fn header_name(&self) -> &'static str {
        match self {
            TriggerType::Standard => ResponseHeaders::HX_TRIGGER,
            TriggerType::AfterSettle => ResponseHeaders::HX_TRIGGER_AFTER_SETTLE,
            TriggerType::AfterSwap => ResponseHeaders::HX_TRIGGER_AFTER_SWAP,
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}
