//! Compatibility rules
//!
//! Each pairwise rule is a single predicate. The candidate filter used while
//! browsing a slot and the whole-build validator both call the same
//! predicates, so the two views cannot disagree.

use std::fmt;

use crate::models::{Build, Case, Cpu, Motherboard, Part, PowerSupply};
use crate::names::normalize_name;
use crate::power::estimate_system_wattage;
use crate::socket::UNKNOWN_SOCKET;

/// Enclosure and board size family.
///
/// Only the compact boundary is enforced by [`fits_in_case`]; mid and full
/// size are classified but never compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeClass {
    Compact,
    Mid,
    Full,
}

impl SizeClass {
    fn classify(text: &str) -> Self {
        let text = normalize_name(text);
        if text.contains("itx") {
            SizeClass::Compact
        } else if text.contains("micro") || text.contains("matx") || text.contains("m atx") {
            SizeClass::Mid
        } else {
            SizeClass::Full
        }
    }

    pub fn for_board(form_factor: &str) -> Self {
        Self::classify(form_factor)
    }

    pub fn for_case(case_type: &str) -> Self {
        Self::classify(case_type)
    }
}

fn socket_known(socket: &str) -> bool {
    let socket = socket.trim();
    !socket.is_empty() && !socket.eq_ignore_ascii_case(UNKNOWN_SOCKET)
}

/// True when both sockets are known and differ
///
/// An unknown socket means compatibility cannot be determined, which is not
/// reported as a conflict.
pub fn socket_conflict(cpu: &Cpu, board: &Motherboard) -> bool {
    socket_known(&cpu.socket)
        && socket_known(&board.socket)
        && !cpu.socket.trim().eq_ignore_ascii_case(board.socket.trim())
}

pub fn psu_sufficient(psu: &PowerSupply, required_watts: u32) -> bool {
    psu.wattage >= required_watts
}

/// A compact case only takes a compact board
pub fn fits_in_case(board: &Motherboard, case: &Case) -> bool {
    SizeClass::for_case(&case.case_type) != SizeClass::Compact
        || SizeClass::for_board(&board.form_factor) == SizeClass::Compact
}

/// Whether a catalog entry should be offered for its slot given the build
pub fn is_candidate_compatible(build: &Build, candidate: &Part) -> bool {
    match candidate {
        Part::Cpu(cpu) => build
            .motherboard
            .as_ref()
            .is_none_or(|board| !socket_conflict(cpu, board)),
        Part::Motherboard(board) => build
            .cpu
            .as_ref()
            .is_none_or(|cpu| !socket_conflict(cpu, board)),
        Part::Case(case) => build
            .motherboard
            .as_ref()
            .is_none_or(|board| fits_in_case(board, case)),
        _ => true,
    }
}

/// Filter a catalog slice down to the entries offered for the build
pub fn compatible_candidates<'a>(build: &Build, catalog: &'a [Part]) -> Vec<&'a Part> {
    catalog
        .iter()
        .filter(|part| is_candidate_compatible(build, part))
        .collect()
}

/// A known incompatibility in a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    SocketMismatch { cpu: String, board: String },
    WeakPsu { required: u32, rated: u32 },
    SizeMismatch { board: String, case: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::SocketMismatch { cpu, board } => {
                write!(f, "Socket Mismatch: CPU is {cpu}, Board is {board}")
            }
            Issue::WeakPsu { required, rated } => write!(
                f,
                "Weak PSU: System needs ~{required}W, but PSU is only {rated}W"
            ),
            Issue::SizeMismatch { board, case } => write!(
                f,
                "Size Mismatch: {board} motherboard likely won't fit in {case} case."
            ),
        }
    }
}

/// All known issues of a build, socket first, then power, then size
pub fn check_build(build: &Build) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let (Some(cpu), Some(board)) = (&build.cpu, &build.motherboard) {
        if socket_conflict(cpu, board) {
            issues.push(Issue::SocketMismatch {
                cpu: cpu.socket.clone(),
                board: board.socket.clone(),
            });
        }
    }

    if let Some(psu) = &build.psu {
        let required = estimate_system_wattage(build);
        if !psu_sufficient(psu, required) {
            issues.push(Issue::WeakPsu {
                required,
                rated: psu.wattage,
            });
        }
    }

    if let (Some(board), Some(case)) = (&build.motherboard, &build.case) {
        if !fits_in_case(board, case) {
            issues.push(Issue::SizeMismatch {
                board: board.form_factor.clone(),
                case: case.case_type.clone(),
            });
        }
    }

    issues
}

/// Human-readable issue messages; empty means no known incompatibility
pub fn validate_build(build: &Build) -> Vec<String> {
    check_build(build).iter().map(Issue::to_string).collect()
}
