//! Permission checks for commands and individual handlers.

use bosun_types::caller::{Caller, PermissionReq};

/// Evaluate a permission requirement against a caller.
///
/// Returns `true` when `req` is absent or the caller holds the key. On
/// denial the requirement's message (falling back to `default_message`)
/// is sent to the caller unless `silent` is set; silent checks are used
/// when enumerating completion candidates so that suggestions the caller
/// cannot use never spam denial messages. A denied check is an expected
/// outcome, not a fault.
pub(crate) fn check(
    caller: &dyn Caller,
    req: Option<&PermissionReq>,
    default_message: &str,
    silent: bool,
) -> bool {
    let Some(req) = req else {
        return true;
    };
    if caller.has_permission(&req.key) {
        return true;
    }
    if !silent {
        caller.send_message(req.denial_message(default_message));
    }
    false
}
