//! Built-in sample catalog for trying the tool without a dataset download
//!
//! These are raw records in the dataset's own shape, so they go through the
//! same normalization as a real ingest (including a duplicate and an
//! unpriced entry that get dropped).

use rusqlite::Connection;
use serde_json::{Value, json};

use crate::db;
use crate::error::Result;
use crate::ingest::{CategoryStats, store_category};
use crate::models::Category;

/// Replace the whole catalog (and the selection) with the sample records
pub fn load_sample(conn: &mut Connection) -> Result<Vec<CategoryStats>> {
    db::clear_catalog(conn)?;
    Category::ALL
        .into_iter()
        .map(|category| store_category(conn, category, &raw_records(category)))
        .collect()
}

/// Raw sample records for one category
pub fn raw_records(category: Category) -> Vec<Value> {
    match category {
        Category::Cpu => vec![
            json!({"name": "AMD Ryzen 7 7800X3D", "price": 449.0, "core_count": 8, "core_clock": 4.2, "boost_clock": 5.0, "tdp": 120, "graphics": "Radeon", "smt": true}),
            json!({"name": "AMD Ryzen 5 7600X", "price": 229.0, "core_count": 6, "core_clock": 4.7, "boost_clock": 5.3, "tdp": 105, "graphics": "Radeon", "smt": true}),
            json!({"name": "AMD Ryzen 5 5600X", "price": 159.0, "core_count": 6, "core_clock": 3.7, "boost_clock": 4.6, "tdp": 65, "graphics": null, "smt": true}),
            json!({"name": "Intel Core i7-14700K", "price": 399.0, "core_count": 20, "core_clock": 3.4, "boost_clock": 5.6, "tdp": 125, "graphics": "Intel UHD Graphics 770", "smt": true}),
            json!({"name": "Intel Core i5-12400F", "price": 129.0, "core_count": 6, "core_clock": 2.5, "boost_clock": 4.4, "tdp": 65, "graphics": null, "smt": true}),
            json!({"name": "Intel Core i5-12400F ", "price": 119.0, "core_count": 6, "core_clock": 2.5, "boost_clock": 4.4, "tdp": 65, "graphics": null, "smt": true}),
            json!({"name": "Intel Core i9-13900K", "price": null, "core_count": 24, "core_clock": 3.0, "boost_clock": 5.8, "tdp": 125, "graphics": "Intel UHD Graphics 770", "smt": true}),
        ],
        Category::Gpu => vec![
            json!({"name": "ASUS TUF Gaming OC", "price": 1799.99, "chipset": "GeForce RTX 4090", "memory": 24, "core_clock": 2235, "boost_clock": 2595, "color": "Black", "length": 348}),
            json!({"name": "MSI VENTUS 2X", "price": 299.99, "chipset": "GeForce RTX 4060 Ti", "memory": 8, "core_clock": 2310, "boost_clock": 2565, "color": "Black", "length": 199}),
            json!({"name": "Sapphire PULSE", "price": 499.99, "chipset": "Radeon RX 7800 XT", "memory": 16, "core_clock": 1295, "boost_clock": 2430, "color": "Black", "length": 280}),
        ],
        Category::Motherboard => vec![
            json!({"name": "MSI MAG B650 TOMAHAWK WIFI", "price": 219.99, "socket": "AM5", "form_factor": "ATX", "max_memory": 192, "memory_slots": 4, "color": "Black"}),
            json!({"name": "ASRock B650I Lightning WiFi", "price": 189.99, "socket": "AM5", "form_factor": "Mini ITX", "max_memory": 64, "memory_slots": 2, "color": "Black"}),
            json!({"name": "Gigabyte B550M DS3H", "price": 99.99, "socket": "AM4", "form_factor": "Micro ATX", "max_memory": 128, "memory_slots": 4, "color": "Black"}),
            json!({"name": "ASUS PRIME Z790-P", "price": 199.99, "socket": "LGA1700", "form_factor": "ATX", "max_memory": 128, "memory_slots": 4, "color": "Black"}),
        ],
        Category::Ram => vec![
            json!({"name": "Corsair Vengeance 32 GB", "price": 104.99, "speed": [5, 6000], "modules": [2, 16], "price_per_gb": 3.281, "color": "Black", "first_word_latency": 10, "cas_latency": 30}),
            json!({"name": "G.Skill Ripjaws V 16 GB", "price": 39.99, "speed": [4, 3200], "modules": [2, 8], "price_per_gb": 2.499, "color": "Black", "first_word_latency": 10, "cas_latency": 16}),
        ],
        Category::Storage => vec![
            json!({"name": "Samsung 990 Pro", "price": 169.99, "capacity": 2000, "price_per_gb": 0.085, "type": "SSD", "cache": 2048, "form_factor": "M.2-2280", "interface": "M.2 PCIe 4.0 X4"}),
            json!({"name": "Seagate BarraCuda", "price": 84.99, "capacity": 4000, "price_per_gb": 0.021, "type": 5400, "cache": 256, "form_factor": "3.5", "interface": "SATA 6.0 Gb/s"}),
        ],
        Category::Psu => vec![
            json!({"name": "Corsair RM850x", "price": 139.99, "type": "ATX", "efficiency": "gold", "wattage": 850, "modular": "Full", "color": "Black"}),
            json!({"name": "EVGA 500 W1", "price": 44.99, "type": "ATX", "efficiency": "plus", "wattage": 500, "modular": false, "color": "Black"}),
            json!({"name": "Corsair SF750", "price": 174.99, "type": "SFX", "efficiency": "platinum", "wattage": 750, "modular": "Full", "color": "Black"}),
        ],
        Category::Case => vec![
            json!({"name": "Fractal Design North", "price": 139.99, "type": "ATX Mid Tower", "color": "Black", "psu": null, "side_panel": "Tempered Glass", "external_volume": 46.0, "internal_35_bays": 2}),
            json!({"name": "Cooler Master NR200P", "price": 99.99, "type": "Mini ITX Tower", "color": "Black", "psu": null, "side_panel": "Tempered Glass", "external_volume": 18.25, "internal_35_bays": 1}),
            json!({"name": "Lian Li Lancool 205M", "price": 79.99, "type": "MicroATX Mini Tower", "color": "Black", "psu": null, "side_panel": "Tempered Glass", "external_volume": 34.0, "internal_35_bays": 2}),
        ],
        Category::Cooler => vec![
            json!({"name": "Thermalright Peerless Assassin 120 SE", "price": 34.9, "rpm": [1100, 1550], "noise_level": 25.6, "color": "Black", "size": null}),
            json!({"name": "Arctic Liquid Freezer III 360", "price": 119.99, "rpm": [200, 1800], "noise_level": [10, 22.5], "color": "Black", "size": 360}),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize_catalog;

    #[test]
    fn every_category_has_usable_records() {
        for category in Category::ALL {
            assert!(!normalize_catalog(&raw_records(category), category).is_empty());
        }
    }

    #[test]
    fn cpu_sample_drops_duplicate_and_unpriced() {
        let raw = raw_records(Category::Cpu);
        assert_eq!(normalize_catalog(&raw, Category::Cpu).len(), raw.len() - 2);
    }
}
