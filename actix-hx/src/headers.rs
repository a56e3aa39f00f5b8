/// Names of the headers htmx sends with its requests.
pub struct RequestHeaders;

/// Names of the headers htmx reacts to on responses.
pub struct ResponseHeaders;

impl RequestHeaders {
    pub const HX_CURRENT_URL: &'static str = "HX-Current-URL";
    pub const HX_BOOSTED: &'static str = "HX-Boosted";
    pub const HX_HISTORY_RESTORE_REQUEST: &'static str = "HX-History-Restore-Request";
    pub const HX_REQUEST: &'static str = "HX-Request";
    pub const HX_TARGET: &'static str = "HX-Target";
    pub const HX_TRIGGER: &'static str = "HX-Trigger";
    pub const HX_TRIGGER_NAME: &'static str = "HX-Trigger-Name";
}

impl ResponseHeaders {
    pub const HX_LOCATION: &'static str = "HX-Location";
    pub const HX_PUSH_URL: &'static str = "HX-Push-Url";
    pub const HX_REDIRECT: &'static str = "HX-Redirect";
    pub const HX_REFRESH: &'static str = "HX-Refresh";
    pub const HX_REPLACE_URL: &'static str = "HX-Replace-Url";
    pub const HX_RESWAP: &'static str = "HX-Reswap";
    pub const HX_RETARGET: &'static str = "HX-Retarget";
    pub const HX_RESELECT: &'static str = "HX-Reselect";
    pub const HX_TRIGGER: &'static str = "HX-Trigger";
    pub const HX_TRIGGER_AFTER_SETTLE: &'static str = "HX-Trigger-After-Settle";
    pub const HX_TRIGGER_AFTER_SWAP: &'static str = "HX-Trigger-After-Swap";
}
