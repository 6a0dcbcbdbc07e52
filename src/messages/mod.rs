// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! The thirteen message-body payload shapes a [`crate::message::Message`]
//! can carry.

pub mod attention;
pub mod close;
pub mod get_list;
pub mod get_proc_parameter;
pub mod get_profile_list;
pub mod get_profile_pack;
pub mod open;
pub mod set_proc_parameter;

pub use attention::AttentionResponse;
pub use close::{CloseRequest, CloseResponse};
pub use get_list::{GetListRequest, GetListResponse};
pub use get_proc_parameter::{GetProcParameterRequest, GetProcParameterResponse};
pub use get_profile_list::GetProfileListResponse;
pub use get_profile_pack::{GetProfilePackRequest, GetProfilePackResponse};
pub use open::{OpenRequest, OpenResponse};
pub use set_proc_parameter::SetProcParameterRequest;
