// SPDX-License-Identifier: MIT

//! Cross-platform process-liveness probe ("is this pid still running?").
//!
//! Used by [`jeeves-ops`](../jeeves_ops/index.html)'s staleness check. Any
//! error from the underlying probe — including permission-denied, which can
//! happen when the pid exists but belongs to another user — is interpreted
//! as "not alive", matching the spec's stated cross-platform contract.

/// Returns whether a process with the given pid currently exists.
///
/// On unix this sends signal 0 via `kill(2)`, which performs existence and
/// permission checks without actually delivering a signal. `EPERM` (process
/// exists but isn't ours) deliberately returns `false` per the documented
/// contract, not `true` — a lock we can't signal is a lock we can't trust.
#[cfg(unix)]
pub fn is_alive(pid: u32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };
    kill(Pid::from_raw(pid), None).is_ok()
}

/// Non-unix fallback: no signal-0 equivalent is wired up, so treat every pid
/// as not alive. This is intentionally conservative — it only ever causes a
/// lock to be treated as stale sooner, never lets a dead owner's lock linger.
#[cfg(not(unix))]
pub fn is_alive(_pid: u32) -> bool {
    false
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
