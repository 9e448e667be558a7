//! Authz wrapping: `MsgExec` per delegator group and the `MsgGrant` set a
//! delegator signs so a grantee may execute those groups.

use crate::cosmos::{CosmosMsg, STAKING_TYPE_URLS};
use crate::error::MessageError;
use btsg_types::{ByDelegator, DelegatorAddress, Timestamp, ONE_YEAR_SECS};
use serde::{Deserialize, Serialize};

pub const MSG_EXEC: &str = "/cosmos.authz.v1beta1.MsgExec";
pub const MSG_GRANT: &str = "/cosmos.authz.v1beta1.MsgGrant";
pub const GENERIC_AUTHORIZATION: &str = "/cosmos.authz.v1beta1.GenericAuthorization";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MsgExecValue {
    pub grantee: String,
    pub msgs: Vec<CosmosMsg>,
}

/// One `MsgExec` wrapping a delegator's messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MsgExec {
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    pub value: MsgExecValue,
}

impl MsgExec {
    pub fn new(grantee: &str, msgs: Vec<CosmosMsg>) -> Self {
        Self {
            type_url: MSG_EXEC.to_string(),
            value: MsgExecValue {
                grantee: grantee.to_string(),
                msgs,
            },
        }
    }

    pub fn grantee(&self) -> &str {
        &self.value.grantee
    }
}

/// Build one exec per delegator group, in group order.
///
/// With no explicit `grantee`, each exec names the group's own delegator.
pub fn build_exec_array(book: &ByDelegator<CosmosMsg>, grantee: Option<&str>) -> Vec<MsgExec> {
    book.iter()
        .map(|(delegator, msgs)| {
            MsgExec::new(grantee.unwrap_or(delegator.as_str()), msgs.to_vec())
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericAuthorization {
    pub msg: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    pub value: GenericAuthorization,
}

/// Protobuf-style timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub seconds: u64,
    pub nanos: u32,
}

impl From<Timestamp> for Expiration {
    fn from(ts: Timestamp) -> Self {
        Self {
            seconds: ts.as_secs(),
            nanos: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub authorization: Authorization,
    pub expiration: Expiration,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgGrantValue {
    pub granter: String,
    pub grantee: String,
    pub grant: Grant,
}

/// Grants from `granter` to `grantee`, one per staking message type, valid
/// for a year from `issued_at`.
pub fn build_grants(
    granter: &DelegatorAddress,
    grantee: &str,
    issued_at: Timestamp,
) -> Result<Vec<CosmosMsg>, MessageError> {
    let expiration = Expiration::from(issued_at.plus_secs(ONE_YEAR_SECS));
    STAKING_TYPE_URLS
        .iter()
        .map(|type_url| {
            CosmosMsg::new(
                MSG_GRANT,
                &MsgGrantValue {
                    granter: granter.to_string(),
                    grantee: grantee.to_string(),
                    grant: Grant {
                        authorization: Authorization {
                            type_url: GENERIC_AUTHORIZATION.to_string(),
                            value: GenericAuthorization {
                                msg: type_url.to_string(),
                            },
                        },
                        expiration,
                    },
                },
            )
        })
        .collect()
}
