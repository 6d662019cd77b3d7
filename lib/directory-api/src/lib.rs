//! Wire types for the remote gateway directory
//!
//! This library defines the payloads exchanged with the directory web API:
//! - CmListResponse: envelope returned by `GetCMList`
//! - CmList: server list, result code and message

pub mod cm_list;

pub use cm_list::{CmList, CmListResponse, GET_CM_LIST_PATH, RESULT_OK};
