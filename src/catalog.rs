//! Raw catalog normalization
//!
//! Turns the loosely typed JSON records of one category into typed parts:
//! records without a usable price are dropped, CPUs get a derived socket,
//! RAM tuples are decomposed, and duplicates collapse onto the first entry
//! with the same trimmed name.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::{
    Case, Category, Cpu, CpuCooler, Gpu, MediaType, Motherboard, Part, PartInfo, PowerSupply, Ram,
    Storage,
};
use crate::socket::{UNKNOWN_SOCKET, classify_socket};

/// Lenient read access to one raw catalog record
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn string(&self, key: &str) -> String {
        self.str(key).unwrap_or_default().to_string()
    }

    /// Numbers, including numbers written as strings
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(as_number)
    }

    pub fn u32(&self, key: &str) -> Option<u32> {
        self.f64(key).and_then(to_u32)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// A two element numeric array such as `[4, 3200]`
    pub fn pair(&self, key: &str) -> Option<(f64, f64)> {
        match self.get(key)?.as_array()?.as_slice() {
            [a, b] => Some((as_number(a)?, as_number(b)?)),
            _ => None,
        }
    }

    /// A number, or the upper bound of a `[min, max]` range
    pub fn upper_bound(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        match value.as_array() {
            Some(items) => items.iter().filter_map(as_number).reduce(f64::max),
            None => as_number(value),
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn to_u32(n: f64) -> Option<u32> {
    (n >= 0.0 && n <= u32::MAX as f64).then(|| n.round() as u32)
}

fn part_info(raw: &RawRecord<'_>) -> Option<PartInfo> {
    let name = raw.str("name")?;
    let price = raw.f64("price")?;
    Some(PartInfo {
        name: name.to_string(),
        price,
        manufacturer: raw.str("manufacturer").map(str::to_string),
        id: raw.str("id").map(str::to_string),
        color: raw.str("color").map(str::to_string),
    })
}

fn parse_cpu(raw: &RawRecord<'_>, info: PartInfo) -> Cpu {
    let socket = match classify_socket(&info.name) {
        Some(rule) => {
            tracing::trace!(cpu = %info.name, family = rule.family, socket = rule.socket, "derived socket");
            rule.socket.to_string()
        }
        None => {
            tracing::debug!(cpu = %info.name, "no socket rule matched");
            UNKNOWN_SOCKET.to_string()
        }
    };
    Cpu {
        core_count: raw.u32("core_count").unwrap_or(0),
        core_clock: raw.f64("core_clock").unwrap_or(0.0),
        boost_clock: raw.f64("boost_clock").unwrap_or(0.0),
        tdp: raw.u32("tdp").unwrap_or(0),
        socket,
        graphics: raw.str("graphics").map(str::to_string),
        smt: raw.bool("smt"),
        info,
    }
}

fn parse_gpu(raw: &RawRecord<'_>, info: PartInfo) -> Gpu {
    Gpu {
        chipset: raw.string("chipset"),
        memory: raw.f64("memory").unwrap_or(0.0),
        core_clock: raw.f64("core_clock").unwrap_or(0.0),
        boost_clock: raw.f64("boost_clock").unwrap_or(0.0),
        tdp: raw.u32("tdp"),
        length: raw.u32("length"),
        info,
    }
}

fn parse_motherboard(raw: &RawRecord<'_>, info: PartInfo) -> Motherboard {
    Motherboard {
        socket: raw.string("socket"),
        form_factor: raw.string("form_factor"),
        max_memory: raw.u32("max_memory").unwrap_or(0),
        memory_slots: raw.u32("memory_slots").unwrap_or(0),
        info,
    }
}

/// Split `speed: [generation, mhz]` and `modules: [count, size_gb]`
fn parse_ram(raw: &RawRecord<'_>, info: PartInfo) -> Ram {
    let (generation, speed) = match raw.pair("speed") {
        Some((code, mhz)) => (format!("DDR{}", code.round() as i64), to_u32(mhz).unwrap_or(0)),
        None => ("Unknown".to_string(), raw.u32("speed").unwrap_or(0)),
    };
    let (stick_count, stick_size_gb) = raw
        .pair("modules")
        .map(|(count, size)| (to_u32(count).unwrap_or(0), to_u32(size).unwrap_or(0)))
        .unwrap_or((0, 0));

    Ram {
        speed,
        generation,
        stick_count,
        stick_size_gb,
        total_capacity: stick_count.saturating_mul(stick_size_gb),
        cas_latency: raw.f64("cas_latency"),
        first_word_latency: raw.f64("first_word_latency"),
        price_per_gb: raw.f64("price_per_gb"),
        info,
    }
}

/// The raw `type` holds "SSD", "HDD" or a spindle speed
fn parse_storage(raw: &RawRecord<'_>, info: PartInfo) -> Storage {
    let is_ssd = raw
        .str("type")
        .is_some_and(|t| t.eq_ignore_ascii_case("ssd"));
    let (media, rpm) = if is_ssd {
        (MediaType::SolidState, None)
    } else {
        (MediaType::Rotational, raw.u32("type").filter(|&rpm| rpm > 0))
    };

    Storage {
        capacity: raw.f64("capacity").unwrap_or(0.0),
        media,
        rpm,
        interface: raw.string("interface"),
        form_factor: raw.string("form_factor"),
        cache: raw.u32("cache"),
        info,
    }
}

fn parse_psu(raw: &RawRecord<'_>, info: PartInfo) -> PowerSupply {
    PowerSupply {
        wattage: raw.u32("wattage").unwrap_or(0),
        efficiency: raw.string("efficiency"),
        modular: raw
            .str("modular")
            .map(str::to_string)
            .or_else(|| raw.bool("modular").map(|m| if m { "Full" } else { "No" }.to_string()))
            .unwrap_or_default(),
        form: raw.str("type").map(str::to_string),
        info,
    }
}

fn parse_case(raw: &RawRecord<'_>, info: PartInfo) -> Case {
    Case {
        case_type: raw.string("type"),
        external_volume: raw.f64("external_volume"),
        internal_35_bays: raw.u32("internal_35_bays"),
        side_panel: raw.str("side_panel").map(str::to_string),
        info,
    }
}

/// Liquid coolers are flagged directly or recognized by their radiator size
fn parse_cooler(raw: &RawRecord<'_>, info: PartInfo) -> CpuCooler {
    let radiator_size = raw.u32("size").filter(|&mm| mm > 0);
    CpuCooler {
        rpm: raw.upper_bound("rpm").and_then(to_u32),
        noise_level: raw.upper_bound("noise_level"),
        liquid_cooled: raw.bool("water_cooled").unwrap_or(radiator_size.is_some()),
        radiator_size,
        info,
    }
}

/// Build one typed part, or `None` when the record is unusable
pub fn parse_part(value: &Value, category: Category) -> Option<Part> {
    let raw = RawRecord::new(value)?;
    let info = part_info(&raw)?;

    let part = match category {
        Category::Cpu => Part::Cpu(parse_cpu(&raw, info)),
        Category::Gpu => Part::Gpu(parse_gpu(&raw, info)),
        Category::Motherboard => Part::Motherboard(parse_motherboard(&raw, info)),
        Category::Ram => Part::Ram(parse_ram(&raw, info)),
        Category::Storage => Part::Storage(parse_storage(&raw, info)),
        Category::Psu => Part::Psu(parse_psu(&raw, info)),
        Category::Case => Part::Case(parse_case(&raw, info)),
        Category::Cooler => Part::Cooler(parse_cooler(&raw, info)),
    };
    Some(part)
}

/// Keep the first part for each trimmed name, preserving order
pub fn dedupe_by_name(parts: Vec<Part>) -> Vec<Part> {
    let mut seen = HashSet::new();
    parts
        .into_iter()
        .filter(|part| seen.insert(part.name().trim().to_string()))
        .collect()
}

/// Normalize the raw records of one category into typed parts
pub fn normalize_catalog(records: &[Value], category: Category) -> Vec<Part> {
    let parsed: Vec<Part> = records
        .iter()
        .filter_map(|record| {
            let part = parse_part(record, category);
            if part.is_none() {
                tracing::debug!(%category, "dropping record without name or price");
            }
            part
        })
        .collect();

    let usable = parsed.len();
    let parts = dedupe_by_name(parsed);
    tracing::debug!(
        %category,
        raw = records.len(),
        usable,
        unique = parts.len(),
        "normalized catalog"
    );
    parts
}
