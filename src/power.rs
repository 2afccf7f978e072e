//! Power draw estimation
//!
//! GPU wattage is a best-effort guess from the chipset name when the catalog
//! has no TDP. System wattage is a plain sum of per-slot contributions and is
//! recomputed on every call.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Build, Category, Gpu};
use crate::names::normalize_name;

/// Returned when neither the table nor the generic markers match
pub const DEFAULT_GPU_WATTS: u32 = 150;

pub const MOTHERBOARD_WATTS: u32 = 50;
pub const RAM_STICK_WATTS: u32 = 5;
pub const STORAGE_WATTS: u32 = 10;
pub const LIQUID_COOLER_WATTS: u32 = 15;
pub const AIR_COOLER_WATTS: u32 = 5;
pub const CASE_WATTS: u32 = 10;

enum GpuMatch {
    Substring(&'static str),
    Pattern(&'static str),
}

use GpuMatch::{Pattern, Substring};

/// Newest and highest tier first, first match wins.
const GPU_RULES: &[(GpuMatch, u32)] = &[
    // Unreleased RTX generations, assume the worst
    (Pattern(r"rtx [6-9]\d{3}"), 600),
    // GeForce RTX 50
    (Substring("5090"), 575),
    (Substring("5080 super"), 415),
    (Substring("5080"), 360),
    (Substring("5070 ti super"), 350),
    (Substring("5070 ti"), 300),
    (Substring("5070 super"), 275),
    (Substring("5070"), 250),
    (Substring("5060 ti"), 180),
    (Substring("5060"), 145),
    (Substring("5050"), 130),
    // GeForce RTX 40
    (Substring("4090"), 450),
    (Substring("4080 super"), 320),
    (Substring("4080"), 320),
    (Substring("4070 ti super"), 285),
    (Substring("4070 ti"), 285),
    (Substring("4070 super"), 220),
    (Substring("4070"), 200),
    (Substring("4060 ti"), 160),
    (Substring("4060"), 115),
    // GeForce RTX 30
    (Substring("3090 ti"), 450),
    (Substring("3090"), 350),
    (Substring("3080 ti"), 350),
    (Substring("3080"), 320),
    (Substring("3070 ti"), 290),
    (Substring("3070"), 220),
    (Substring("3060 ti"), 200),
    (Substring("3060"), 170),
    (Substring("3050"), 130),
    // GeForce RTX 20
    (Substring("2080 ti"), 250),
    (Substring("2080 super"), 250),
    (Substring("2080"), 215),
    (Substring("2070 super"), 215),
    (Substring("2070"), 175),
    (Substring("2060 super"), 175),
    (Substring("2060"), 160),
    // GeForce GTX 16
    (Substring("1660 ti"), 120),
    (Substring("1660 super"), 125),
    (Substring("1660"), 120),
    (Substring("1650 super"), 100),
    (Substring("1650"), 75),
    // GeForce GTX 10
    (Substring("1080 ti"), 250),
    (Substring("1080"), 180),
    (Substring("1070 ti"), 180),
    (Substring("1070"), 150),
    (Substring("1060"), 120),
    (Substring("1050 ti"), 75),
    (Substring("1050"), 75),
    // Titan
    (Substring("titan rtx"), 280),
    (Substring("titan v"), 250),
    (Substring("titan xp"), 250),
    (Substring("titan x"), 250),
    // Radeon RX 7000
    (Substring("7900 xtx"), 355),
    (Substring("7900 xt"), 315),
    (Substring("7900 gre"), 260),
    (Substring("7800 xt"), 263),
    (Substring("7700 xt"), 245),
    (Substring("7600 xt"), 190),
    (Substring("7600"), 165),
    // Radeon RX 6000
    (Substring("6950 xt"), 335),
    (Substring("6900 xt"), 300),
    (Substring("6800 xt"), 300),
    (Substring("6800"), 250),
    (Substring("6750 xt"), 250),
    (Substring("6700 xt"), 230),
    (Substring("6650 xt"), 180),
    (Substring("6600 xt"), 160),
    (Substring("6600"), 132),
    (Substring("6500 xt"), 107),
    (Substring("6400"), 53),
    // Radeon RX 5000
    (Substring("5700 xt"), 225),
    (Substring("5700"), 180),
    (Substring("5600 xt"), 150),
    (Substring("5500 xt"), 130),
    // Intel Arc
    (Substring("a770"), 225),
    (Substring("a750"), 225),
    (Substring("a580"), 185),
    (Substring("a380"), 75),
];

/// Coarse markers tried after the table: premium family, then midrange.
const GENERIC_GPU_RULES: &[(&[&str], u32)] = &[(&["rtx", "xt"], 250), (&["gtx", "rx"], 150)];

enum CompiledMatch {
    Substring(&'static str),
    Pattern(Regex),
}

impl CompiledMatch {
    fn is_match(&self, name: &str) -> bool {
        match self {
            CompiledMatch::Substring(s) => name.contains(s),
            CompiledMatch::Pattern(re) => re.is_match(name),
        }
    }
}

static COMPILED_GPU_RULES: LazyLock<Vec<(CompiledMatch, u32)>> = LazyLock::new(|| {
    GPU_RULES
        .iter()
        .filter_map(|(matcher, watts)| {
            let compiled = match matcher {
                Substring(s) => CompiledMatch::Substring(*s),
                Pattern(p) => match Regex::new(p) {
                    Ok(re) => CompiledMatch::Pattern(re),
                    Err(e) => {
                        tracing::error!(pattern = *p, error = %e, "skipping invalid GPU rule");
                        return None;
                    }
                },
            };
            Some((compiled, *watts))
        })
        .collect()
});

/// Estimate a GPU's power draw in watts
///
/// An explicit positive TDP from the catalog always wins. Otherwise the
/// chipset (or the name when the chipset is blank) is matched against the
/// known-model table. The result is a guess, never zero.
pub fn estimate_gpu_wattage(gpu: &Gpu) -> u32 {
    if let Some(tdp) = gpu.tdp.filter(|&tdp| tdp > 0) {
        return tdp;
    }

    let source = if gpu.chipset.trim().is_empty() {
        &gpu.info.name
    } else {
        &gpu.chipset
    };
    let name = normalize_name(source);

    if let Some((_, watts)) = COMPILED_GPU_RULES.iter().find(|(m, _)| m.is_match(&name)) {
        return *watts;
    }

    GENERIC_GPU_RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| name.contains(m)))
        .map(|(_, watts)| *watts)
        .unwrap_or(DEFAULT_GPU_WATTS)
}

/// Per-slot power contributions of the occupied slots, in category order
pub fn power_breakdown(build: &Build) -> Vec<(Category, u32)> {
    let mut parts = Vec::new();

    if let Some(cpu) = &build.cpu {
        parts.push((Category::Cpu, cpu.tdp));
    }
    if let Some(gpu) = &build.gpu {
        parts.push((Category::Gpu, estimate_gpu_wattage(gpu)));
    }
    if build.motherboard.is_some() {
        parts.push((Category::Motherboard, MOTHERBOARD_WATTS));
    }
    if let Some(ram) = &build.ram {
        parts.push((Category::Ram, ram.stick_count.saturating_mul(RAM_STICK_WATTS)));
    }
    if build.storage.is_some() {
        parts.push((Category::Storage, STORAGE_WATTS));
    }
    if build.case.is_some() {
        parts.push((Category::Case, CASE_WATTS));
    }
    if let Some(cooler) = &build.cooler {
        let watts = if cooler.liquid_cooled {
            LIQUID_COOLER_WATTS
        } else {
            AIR_COOLER_WATTS
        };
        parts.push((Category::Cooler, watts));
    }

    parts
}

/// Estimated total system draw in watts, saturating at `u32::MAX`
pub fn estimate_system_wattage(build: &Build) -> u32 {
    power_breakdown(build)
        .iter()
        .map(|(_, watts)| *watts)
        .fold(0, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cpu, CpuCooler, Motherboard, PartInfo, Ram};

    fn gpu(chipset: &str, tdp: Option<u32>) -> Gpu {
        Gpu {
            info: PartInfo::new(format!("Some {chipset}"), 500.0),
            chipset: chipset.to_string(),
            memory: 8.0,
            core_clock: 1500.0,
            boost_clock: 1800.0,
            tdp,
            length: None,
        }
    }

    #[test]
    fn every_gpu_rule_compiles() {
        assert_eq!(COMPILED_GPU_RULES.len(), GPU_RULES.len());
    }

    #[test]
    fn explicit_tdp_wins() {
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4090", Some(480))), 480);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4090", Some(0))), 450);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4090", None)), 450);
    }

    #[test]
    fn table_prefers_specific_variants() {
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4070 Ti SUPER", None)), 285);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4070 SUPER", None)), 220);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 4060-Ti", None)), 160);
        assert_eq!(estimate_gpu_wattage(&gpu("Radeon RX 7900 XTX", None)), 355);
        assert_eq!(estimate_gpu_wattage(&gpu("Radeon RX 7900 XT", None)), 315);
        assert_eq!(estimate_gpu_wattage(&gpu("Arc A770", None)), 225);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX 6090", None)), 600);
    }

    #[test]
    fn generic_fallbacks_and_default() {
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce RTX A4000", None)), 250);
        assert_eq!(estimate_gpu_wattage(&gpu("GeForce GTX 980", None)), 150);
        assert_eq!(estimate_gpu_wattage(&gpu("Quadro P400", None)), DEFAULT_GPU_WATTS);
    }

    #[test]
    fn blank_chipset_uses_name() {
        let mut card = gpu("", None);
        card.info.name = "MSI GeForce RTX 3080 Gaming".to_string();
        assert_eq!(estimate_gpu_wattage(&card), 320);
    }

    #[test]
    fn empty_build_draws_nothing() {
        assert_eq!(estimate_system_wattage(&Build::new()), 0);
        assert!(power_breakdown(&Build::new()).is_empty());
    }

    #[test]
    fn absurd_catalog_values_saturate() {
        let mut ram = Ram {
            info: PartInfo::new("Huge", 1.0),
            speed: 6000,
            generation: "DDR5".to_string(),
            stick_count: 1_000_000_000,
            stick_size_gb: 1,
            total_capacity: 1_000_000_000,
            cas_latency: None,
            first_word_latency: None,
            price_per_gb: None,
        };
        let build = Build {
            ram: Some(ram.clone()),
            ..Build::default()
        };
        assert_eq!(estimate_system_wattage(&build), u32::MAX);

        ram.stick_count = 2;
        let build = Build {
            cpu: Some(Cpu {
                info: PartInfo::new("CPU", 1.0),
                core_count: 8,
                core_clock: 4.2,
                boost_clock: 5.0,
                tdp: u32::MAX,
                socket: "AM5".to_string(),
                graphics: None,
                smt: None,
            }),
            ram: Some(ram),
            ..Build::default()
        };
        assert_eq!(estimate_system_wattage(&build), u32::MAX);
    }

    #[test]
    fn system_wattage_sums_slots() {
        let build = Build {
            cpu: Some(Cpu {
                info: PartInfo::new("CPU", 1.0),
                core_count: 8,
                core_clock: 4.2,
                boost_clock: 5.0,
                tdp: 120,
                socket: "AM5".to_string(),
                graphics: None,
                smt: None,
            }),
            gpu: Some(gpu("GeForce RTX 4090", None)),
            motherboard: Some(Motherboard {
                info: PartInfo::new("Board", 1.0),
                socket: "AM5".to_string(),
                form_factor: "ATX".to_string(),
                max_memory: 128,
                memory_slots: 4,
            }),
            ram: Some(Ram {
                info: PartInfo::new("RAM", 1.0),
                speed: 6000,
                generation: "DDR5".to_string(),
                stick_count: 2,
                stick_size_gb: 16,
                total_capacity: 32,
                cas_latency: None,
                first_word_latency: None,
                price_per_gb: None,
            }),
            cooler: Some(CpuCooler {
                info: PartInfo::new("AIO", 1.0),
                rpm: None,
                noise_level: None,
                liquid_cooled: true,
                radiator_size: Some(360),
            }),
            ..Build::default()
        };

        let expected = 120 + 450 + MOTHERBOARD_WATTS + 2 * RAM_STICK_WATTS + LIQUID_COOLER_WATTS;
        assert_eq!(estimate_system_wattage(&build), expected);
        assert_eq!(
            power_breakdown(&build),
            vec![
                (Category::Cpu, 120),
                (Category::Gpu, 450),
                (Category::Motherboard, MOTHERBOARD_WATTS),
                (Category::Ram, 2 * RAM_STICK_WATTS),
                (Category::Cooler, LIQUID_COOLER_WATTS),
            ]
        );
    }
}
