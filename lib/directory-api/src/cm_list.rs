use serde::{Deserialize, Serialize};

/// Path of the server list method, relative to the directory base URL
pub const GET_CM_LIST_PATH: &str = "/ISteamDirectory/GetCMList/v1/";

/// Result code the directory reports on success
pub const RESULT_OK: u32 = 1;

/// Envelope returned by `GetCMList`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CmListResponse {
    pub response: CmList,
}

/// Body of a `GetCMList` response
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CmList {
    /// Gateway addresses in `host:port` form
    #[serde(default, alias = "serverList", alias = "ServerList")]
    pub serverlist: Vec<String>,

    /// Result code, `RESULT_OK` on success
    #[serde(default, alias = "Result")]
    pub result: u32,

    /// Human readable detail accompanying a failed result
    #[serde(default, alias = "Message")]
    pub message: String,
}

impl CmList {
    /// Whether the directory reported success
    pub fn is_ok(&self) -> bool {
        self.result == RESULT_OK
    }
}
