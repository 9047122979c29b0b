use std::collections::HashMap;

use divvy_domain::MemberId;

use crate::Ledger;

/// Display-name lookup for presentation-layer callers.
///
/// The core stays symmetric across members; filtering balances or transfers
/// down to a distinguished "current user" is the caller's concern.
pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

impl MemberDirectory for Ledger {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.member(member_id).map(|member| member.name.as_str())
    }
}
