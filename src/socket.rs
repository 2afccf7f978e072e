//! CPU socket derivation from part names
//!
//! The catalog never carries a socket for CPUs, so it is inferred from the
//! model name with an ordered rule table. Rules are checked top to bottom
//! against the normalized name and the first hit wins. Specific families
//! (HEDT, Xeon generations, adjacent Pentium ranges) sit above the generic
//! ones they would otherwise be swallowed by.

use std::sync::LazyLock;

use regex::Regex;

use crate::names::normalize_name;

/// Socket label returned when no rule matches.
pub const UNKNOWN_SOCKET: &str = "Unknown";

/// (family, pattern over the normalized name, socket)
const SOCKET_RULES: &[(&str, &str, &str)] = &[
    // AMD server
    ("AMD EPYC", r"\bepyc 9\w{3}", "SP5"),
    ("AMD EPYC", r"\bepyc 8\w{3}", "SP6"),
    ("AMD EPYC", r"\bepyc 7\w{3}", "SP3"),
    ("AMD EPYC", r"\bepyc 4\w{3}", "AM5"),
    ("AMD EPYC", r"\bepyc 3\w{3}", "SP4"),
    // AMD workstation
    ("AMD Threadripper PRO", r"\bthreadripper pro [79]\d{3}", "sTR5"),
    ("AMD Threadripper PRO", r"\bthreadripper pro [35]\d{3}", "sWRX8"),
    ("AMD Threadripper", r"\bthreadripper [79]\d{3}", "sTR5"),
    ("AMD Threadripper", r"\bthreadripper 3\d{3}", "sTRX4"),
    ("AMD Threadripper", r"\bthreadripper [12]\d{3}", "TR4"),
    ("AMD Threadripper", r"\bthreadripper\b", "sTRX4"),
    // AMD mainstream
    ("AMD Ryzen", r"\bryzen \d+ (?:pro )?[789]\d{3}", "AM5"),
    ("AMD Ryzen", r"\bryzen \d+ (?:pro )?[1-5]\d{3}", "AM4"),
    // AMD legacy
    ("AMD Athlon", r"\bathlon (?:pro |gold |silver )?(?:[23]\d{2}ge|3\d{3}ge?)\b", "AM4"),
    ("AMD Athlon", r"\bathlon x4 9\d{2}", "AM4"),
    ("AMD Athlon", r"\bathlon x4 8\d{2}", "FM2+"),
    ("AMD Athlon", r"\bathlon x4 7\d{2}", "FM2"),
    ("AMD Athlon", r"\bathlon ii\b", "AM3"),
    ("AMD Athlon", r"\bathlon 64\b", "AM2"),
    ("AMD FX", r"\bfx \d{4}", "AM3+"),
    ("AMD Phenom", r"\bphenom ii\b", "AM3"),
    ("AMD Phenom", r"\bphenom\b", "AM2+"),
    ("AMD Sempron", r"\bsempron [23]\d{3}", "AM1"),
    ("AMD Sempron", r"\bsempron \d{3}\b", "AM3"),
    ("AMD A-Series", r"\ba\d{1,2} (?:pro )?9\d{3}", "AM4"),
    ("AMD A-Series", r"\ba\d{1,2} (?:pro )?7\d{3}", "FM2+"),
    ("AMD A-Series", r"\ba\d{1,2} [456]\d{3}", "FM2"),
    ("AMD A-Series", r"\ba\d{1,2} 3\d{3}", "FM1"),
    ("AMD Opteron", r"\bopteron 6\d{3}", "G34"),
    ("AMD Opteron", r"\bopteron 4\d{3}", "C32"),
    ("AMD Opteron", r"\bopteron 3\d{3}", "AM3+"),
    // Intel Core Ultra
    ("Intel Core Ultra", r"\bultra \d+ 2\d{2}", "LGA1851"),
    ("Intel Core Ultra", r"\bultra \d+ 1\d{2}", "BGA"),
    // Intel HEDT, ahead of mainstream because the model numbers overlap
    ("Intel Core X", r"\bi[579] (?:7\d{3}|9\d{3}|10\d{3})xe?\b", "LGA2066"),
    ("Intel Core HEDT", r"\bi7 (?:58|59|68|69)\d{2}[kx]?\b", "LGA2011-3"),
    ("Intel Core HEDT", r"\bi7 (?:38[2-9]\d|39[3-9]\d|48[2-9]\d|49[3-9]\d)[kx]?\b", "LGA2011"),
    ("Intel Core HEDT", r"\bi7 9\d{2}x?\b", "LGA1366"),
    // Intel mainstream
    ("Intel Core", r"\bi\d (?:12|13|14)\d{3}[a-z]*\b", "LGA1700"),
    ("Intel Core", r"\bi\d 1[01]\d{3}[a-z]*\b", "LGA1200"),
    ("Intel Core", r"\bi\d [6-9]\d{3}[a-z]*\b", "LGA1151"),
    ("Intel Core", r"\bi\d [45]\d{3}[a-z]*\b", "LGA1150"),
    ("Intel Core", r"\bi\d [23]\d{3}[a-z]*\b", "LGA1155"),
    ("Intel Core", r"\bi\d [5-8]\d{2}[a-z]*\b", "LGA1156"),
    ("Intel Core", r"\bcore [357] 1\d{2}[a-z]*\b", "LGA1700"),
    // Intel Xeon
    ("Intel Xeon W", r"\bxeon w[3579] [23]\d{3}", "LGA4677"),
    ("Intel Xeon W", r"\bxeon w 1\d{3}", "LGA1200"),
    ("Intel Xeon W", r"\bxeon w 2\d{3}", "LGA2066"),
    ("Intel Xeon W", r"\bxeon w 3[12]\d{2}", "LGA3647"),
    ("Intel Xeon W", r"\bxeon w 33\d{2}", "LGA4189"),
    ("Intel Xeon E3", r"\bxeon e3 \d{4}[a-z]* ?v[56]\b", "LGA1151"),
    ("Intel Xeon E3", r"\bxeon e3 \d{4}[a-z]* ?v[34]\b", "LGA1150"),
    ("Intel Xeon E3", r"\bxeon e3 \d{4}", "LGA1155"),
    ("Intel Xeon E5", r"\bxeon e5 \d{4}[a-z]* ?v[34]\b", "LGA2011-3"),
    ("Intel Xeon E5", r"\bxeon e5 \d{4}", "LGA2011"),
    ("Intel Xeon E", r"\bxeon e 2[12]\d{2}", "LGA1151"),
    ("Intel Xeon E", r"\bxeon e 23\d{2}", "LGA1200"),
    ("Intel Xeon E", r"\bxeon e 24\d{2}", "LGA1700"),
    ("Intel Xeon Scalable", r"\bxeon (?:bronze|silver|gold|platinum) \d[12]\d{2}", "LGA3647"),
    ("Intel Xeon Scalable", r"\bxeon (?:bronze|silver|gold|platinum) \d3\d{2}", "LGA4189"),
    ("Intel Xeon Scalable", r"\bxeon (?:bronze|silver|gold|platinum) \d[45]\d{2}", "LGA4677"),
    // Intel Pentium, G69xx is Clarkdale and must not fall into the G6400 range
    ("Intel Pentium", r"\bpentium (?:gold )?g74\d{2}", "LGA1700"),
    ("Intel Pentium", r"\bpentium (?:gold )?g69\d{2}", "LGA1156"),
    ("Intel Pentium", r"\bpentium (?:gold )?g6[4-6]\d{2}", "LGA1200"),
    ("Intel Pentium", r"\bpentium (?:gold )?g(?:5[4-6]|4[4-6])\d{2}", "LGA1151"),
    ("Intel Pentium", r"\bpentium g3\d{3}", "LGA1150"),
    ("Intel Pentium", r"\bpentium g2\d{3}", "LGA1155"),
    ("Intel Pentium", r"\bpentium g[68]\d{2}\b", "LGA1155"),
    // Intel Celeron, G69xx here is Alder Lake
    ("Intel Celeron", r"\bceleron g69\d{2}", "LGA1700"),
    ("Intel Celeron", r"\bceleron g59\d{2}", "LGA1200"),
    ("Intel Celeron", r"\bceleron g(?:49|39)\d{2}", "LGA1151"),
    ("Intel Celeron", r"\bceleron g18\d{2}", "LGA1150"),
    ("Intel Celeron", r"\bceleron g1[0-6]\d{2}", "LGA1155"),
    ("Intel Celeron", r"\bceleron g[45]\d{2}\b", "LGA1155"),
    // Intel legacy
    ("Intel Core 2", r"\bcore 2\b", "LGA775"),
    ("Intel Pentium", r"\bpentium (?:4|d)\b", "LGA775"),
    ("Intel Pentium", r"\bpentium (?:dual core|e\d{4})", "LGA775"),
];

/// A compiled socket rule.
#[derive(Debug)]
pub struct SocketRule {
    pub family: &'static str,
    pub socket: &'static str,
    pattern: Regex,
}

static RULES: LazyLock<Vec<SocketRule>> = LazyLock::new(|| {
    SOCKET_RULES
        .iter()
        .filter_map(|&(family, pattern, socket)| match Regex::new(pattern) {
            Ok(pattern) => Some(SocketRule {
                family,
                socket,
                pattern,
            }),
            Err(e) => {
                tracing::error!(family, pattern, error = %e, "skipping invalid socket rule");
                None
            }
        })
        .collect()
});

/// Find the first rule matching a CPU name, if any
pub fn classify_socket(cpu_name: &str) -> Option<&'static SocketRule> {
    let name = normalize_name(cpu_name);
    RULES.iter().find(|rule| rule.pattern.is_match(&name))
}

/// Derive the socket for a CPU name, or [`UNKNOWN_SOCKET`]
pub fn derive_socket(cpu_name: &str) -> String {
    classify_socket(cpu_name)
        .map(|rule| rule.socket)
        .unwrap_or(UNKNOWN_SOCKET)
        .to_string()
}
