//! Data models for catalog parts and builds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fields shared by every catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PartInfo {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            manufacturer: None,
            id: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(flatten)]
    pub info: PartInfo,
    pub core_count: u32,
    pub core_clock: f64,
    pub boost_clock: f64,
    pub tdp: u32,
    pub socket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smt: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(flatten)]
    pub info: PartInfo,
    pub chipset: String,
    pub memory: f64, // GB
    pub core_clock: f64,
    pub boost_clock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>, // mm
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motherboard {
    #[serde(flatten)]
    pub info: PartInfo,
    pub socket: String,
    pub form_factor: String,
    pub max_memory: u32,
    pub memory_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(flatten)]
    pub info: PartInfo,
    pub speed: u32,         // MHz
    pub generation: String, // DDR4, DDR5, ...
    pub stick_count: u32,
    pub stick_size_gb: u32,
    pub total_capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cas_latency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_word_latency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_gb: Option<f64>,
}

/// Storage media, solid state or spinning platters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    SolidState,
    Rotational,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::SolidState => write!(f, "SSD"),
            MediaType::Rotational => write!(f, "HDD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(flatten)]
    pub info: PartInfo,
    pub capacity: f64, // GB
    pub media: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u32>,
    pub interface: String,
    pub form_factor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<u32>, // MB
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSupply {
    #[serde(flatten)]
    pub info: PartInfo,
    pub wattage: u32,
    pub efficiency: String,
    pub modular: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>, // ATX, SFX, ...
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(flatten)]
    pub info: PartInfo,
    pub case_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_volume: Option<f64>, // litres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_35_bays: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_panel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuCooler {
    #[serde(flatten)]
    pub info: PartInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<f64>, // dB
    pub liquid_cooled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiator_size: Option<u32>, // mm
}

/// One of the eight build slots, which are also the catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Storage,
    Psu,
    Case,
    Cooler,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Gpu,
        Category::Motherboard,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooler,
    ];

    /// Lowercase key used on the command line and in the database
    pub fn key(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Gpu => "gpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Case => "case",
            Category::Cooler => "cooler",
        }
    }

    /// File stem of the category in a pc-part-dataset style directory
    pub fn dataset_stem(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Gpu => "video-card",
            Category::Motherboard => "motherboard",
            Category::Ram => "memory",
            Category::Storage => "internal-hard-drive",
            Category::Psu => "power-supply",
            Category::Case => "case",
            Category::Cooler => "cpu-cooler",
        }
    }

    pub fn from_dataset_stem(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.dataset_stem() == stem)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Motherboard => "Motherboard",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Psu => "PSU",
            Category::Case => "Case",
            Category::Cooler => "Cooler",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.dataset_stem() == wanted)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A normalized catalog entry of any category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Part {
    Cpu(Cpu),
    Gpu(Gpu),
    Motherboard(Motherboard),
    Ram(Ram),
    Storage(Storage),
    Psu(PowerSupply),
    Case(Case),
    Cooler(CpuCooler),
}

impl Part {
    pub fn category(&self) -> Category {
        match self {
            Part::Cpu(_) => Category::Cpu,
            Part::Gpu(_) => Category::Gpu,
            Part::Motherboard(_) => Category::Motherboard,
            Part::Ram(_) => Category::Ram,
            Part::Storage(_) => Category::Storage,
            Part::Psu(_) => Category::Psu,
            Part::Case(_) => Category::Case,
            Part::Cooler(_) => Category::Cooler,
        }
    }

    pub fn info(&self) -> &PartInfo {
        match self {
            Part::Cpu(p) => &p.info,
            Part::Gpu(p) => &p.info,
            Part::Motherboard(p) => &p.info,
            Part::Ram(p) => &p.info,
            Part::Storage(p) => &p.info,
            Part::Psu(p) => &p.info,
            Part::Case(p) => &p.info,
            Part::Cooler(p) => &p.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Short category-specific description for listings
    pub fn summary(&self) -> String {
        match self {
            Part::Cpu(p) => format!("{} cores, {}W, {}", p.core_count, p.tdp, p.socket),
            Part::Gpu(p) => format!("{}, {} GB", p.chipset, p.memory),
            Part::Motherboard(p) => format!("{}, {}", p.socket, p.form_factor),
            Part::Ram(p) => format!(
                "{}-{}, {}x{} GB",
                p.generation, p.speed, p.stick_count, p.stick_size_gb
            ),
            Part::Storage(p) => format!("{} GB {}, {}", p.capacity, p.media, p.interface),
            Part::Psu(p) => format!("{}W, {}", p.wattage, p.efficiency),
            Part::Case(p) => p.case_type.clone(),
            Part::Cooler(p) => {
                if p.liquid_cooled {
                    "liquid".to_string()
                } else {
                    "air".to_string()
                }
            }
        }
    }
}

/// The user's current selection, at most one part per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub cpu: Option<Cpu>,
    pub gpu: Option<Gpu>,
    pub motherboard: Option<Motherboard>,
    pub ram: Option<Ram>,
    pub storage: Option<Storage>,
    pub psu: Option<PowerSupply>,
    pub case: Option<Case>,
    pub cooler: Option<CpuCooler>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a part into its slot, replacing whatever was there
    pub fn select(&mut self, part: Part) {
        match part {
            Part::Cpu(p) => self.cpu = Some(p),
            Part::Gpu(p) => self.gpu = Some(p),
            Part::Motherboard(p) => self.motherboard = Some(p),
            Part::Ram(p) => self.ram = Some(p),
            Part::Storage(p) => self.storage = Some(p),
            Part::Psu(p) => self.psu = Some(p),
            Part::Case(p) => self.case = Some(p),
            Part::Cooler(p) => self.cooler = Some(p),
        }
    }

    pub fn with(mut self, part: Part) -> Self {
        self.select(part);
        self
    }

    pub fn remove(&mut self, category: Category) {
        match category {
            Category::Cpu => self.cpu = None,
            Category::Gpu => self.gpu = None,
            Category::Motherboard => self.motherboard = None,
            Category::Ram => self.ram = None,
            Category::Storage => self.storage = None,
            Category::Psu => self.psu = None,
            Category::Case => self.case = None,
            Category::Cooler => self.cooler = None,
        }
    }

    pub fn get(&self, category: Category) -> Option<&PartInfo> {
        match category {
            Category::Cpu => self.cpu.as_ref().map(|p| &p.info),
            Category::Gpu => self.gpu.as_ref().map(|p| &p.info),
            Category::Motherboard => self.motherboard.as_ref().map(|p| &p.info),
            Category::Ram => self.ram.as_ref().map(|p| &p.info),
            Category::Storage => self.storage.as_ref().map(|p| &p.info),
            Category::Psu => self.psu.as_ref().map(|p| &p.info),
            Category::Case => self.case.as_ref().map(|p| &p.info),
            Category::Cooler => self.cooler.as_ref().map(|p| &p.info),
        }
    }

    /// Occupied slots in category order
    pub fn selected(&self) -> impl Iterator<Item = (Category, &PartInfo)> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|info| (c, info)))
    }

    pub fn total_cost(&self) -> f64 {
        self.selected().fold(0.0, |total, (_, info)| total + info.price)
    }

    /// Empty slots in category order
    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.selected().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(name: &str, price: f64) -> Part {
        Part::Motherboard(Motherboard {
            info: PartInfo::new(name, price),
            socket: "AM5".to_string(),
            form_factor: "ATX".to_string(),
            max_memory: 128,
            memory_slots: 4,
        })
    }

    fn case(name: &str, price: f64) -> Part {
        Part::Case(Case {
            info: PartInfo::new(name, price),
            case_type: "ATX Mid Tower".to_string(),
            external_volume: None,
            internal_35_bays: None,
            side_panel: None,
        })
    }

    #[test]
    fn category_parses_keys_and_stems() {
        assert_eq!("cpu".parse::<Category>().unwrap(), Category::Cpu);
        assert_eq!("PSU".parse::<Category>().unwrap(), Category::Psu);
        assert_eq!("video-card".parse::<Category>().unwrap(), Category::Gpu);
        assert_eq!(Category::from_dataset_stem("cpu-cooler"), Some(Category::Cooler));
        assert_eq!(Category::from_dataset_stem("keyboard"), None);
        assert!(matches!(
            "keyboard".parse::<Category>(),
            Err(Error::UnknownCategory(s)) if s == "keyboard"
        ));
    }

    #[test]
    fn select_replaces_slot() {
        let mut build = Build::new();
        build.select(board("First", 100.0));
        build.select(board("Second", 150.0));
        assert_eq!(build.get(Category::Motherboard).unwrap().name, "Second");
        assert_eq!(build.selected().count(), 1);
    }

    #[test]
    fn cost_and_missing_track_selection() {
        let mut build = Build::new().with(board("Board", 199.99)).with(case("Case", 80.01));
        assert!((build.total_cost() - 280.0).abs() < 1e-9);
        assert_eq!(build.missing().len(), 6);
        assert!(!build.missing().contains(&Category::Case));
        assert!(!build.is_complete());

        build.remove(Category::Case);
        assert!(build.missing().contains(&Category::Case));
        build.remove(Category::Motherboard);
        assert!(build.is_empty());
        assert_eq!(build.total_cost(), 0.0);
        assert!(build.total_cost().is_sign_positive());
        assert_eq!(format!("{:.2}", build.total_cost()), "0.00");
    }

    #[test]
    fn part_serializes_with_category_tag() {
        let value = serde_json::to_value(board("Board", 10.0)).unwrap();
        assert_eq!(value["category"], "motherboard");
        assert_eq!(value["name"], "Board");
        let back: Part = serde_json::from_value(value).unwrap();
        assert_eq!(back.category(), Category::Motherboard);
    }
}
