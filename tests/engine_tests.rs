//! End-to-end: raw records through normalization, filtering and validation

use pretty_assertions::assert_eq;
use serde_json::json;

use rigcheck::sample::raw_records;
use rigcheck::{
    Build, Category, Part, compatible_candidates, derive_socket, estimate_gpu_wattage,
    estimate_system_wattage, is_candidate_compatible, normalize_catalog, validate_build,
};

fn catalog(category: Category) -> Vec<Part> {
    normalize_catalog(&raw_records(category), category)
}

fn pick(category: Category, name: &str) -> Part {
    catalog(category)
        .into_iter()
        .find(|p| p.name() == name)
        .unwrap_or_else(|| panic!("{name} not in sample {category} catalog"))
}

#[test]
fn sample_cpus_get_sockets() {
    let sockets: Vec<(String, String)> = catalog(Category::Cpu)
        .into_iter()
        .filter_map(|p| match p {
            Part::Cpu(cpu) => Some((cpu.info.name, cpu.socket)),
            _ => None,
        })
        .collect();

    assert_eq!(
        sockets,
        vec![
            ("AMD Ryzen 7 7800X3D".to_string(), "AM5".to_string()),
            ("AMD Ryzen 5 7600X".to_string(), "AM5".to_string()),
            ("AMD Ryzen 5 5600X".to_string(), "AM4".to_string()),
            ("Intel Core i7-14700K".to_string(), "LGA1700".to_string()),
            ("Intel Core i5-12400F".to_string(), "LGA1700".to_string()),
        ]
    );
}

#[test]
fn derive_socket_matches_normalized_value() {
    for part in catalog(Category::Cpu) {
        if let Part::Cpu(cpu) = part {
            assert_eq!(derive_socket(&cpu.info.name), cpu.socket);
        }
    }
}

#[test]
fn board_choice_narrows_cpus_and_cases() {
    let build = Build::new().with(pick(Category::Motherboard, "MSI MAG B650 TOMAHAWK WIFI"));

    let cpus = catalog(Category::Cpu);
    let offered: Vec<&str> = compatible_candidates(&build, &cpus)
        .into_iter()
        .map(Part::name)
        .collect();
    assert_eq!(offered, vec!["AMD Ryzen 7 7800X3D", "AMD Ryzen 5 7600X"]);

    let cases = catalog(Category::Case);
    let offered: Vec<&str> = compatible_candidates(&build, &cases)
        .into_iter()
        .map(Part::name)
        .collect();
    assert_eq!(offered, vec!["Fractal Design North", "Lian Li Lancool 205M"]);
}

#[test]
fn cpu_choice_narrows_boards() {
    let build = Build::new().with(pick(Category::Cpu, "Intel Core i5-12400F"));
    let boards = catalog(Category::Motherboard);
    let offered: Vec<&str> = boards
        .iter()
        .filter(|b| is_candidate_compatible(&build, b))
        .map(Part::name)
        .collect();
    assert_eq!(offered, vec!["ASUS PRIME Z790-P"]);
}

#[test]
fn unconstrained_slots_offer_everything() {
    let build = Build::new()
        .with(pick(Category::Cpu, "AMD Ryzen 5 7600X"))
        .with(pick(Category::Motherboard, "ASRock B650I Lightning WiFi"));
    for category in [Category::Gpu, Category::Ram, Category::Storage, Category::Psu, Category::Cooler] {
        let parts = catalog(category);
        assert_eq!(compatible_candidates(&build, &parts).len(), parts.len());
    }
}

#[test]
fn full_compatible_build() {
    let mut build = Build::new();
    for (category, name) in [
        (Category::Cpu, "AMD Ryzen 7 7800X3D"),
        (Category::Gpu, "ASUS TUF Gaming OC"),
        (Category::Motherboard, "MSI MAG B650 TOMAHAWK WIFI"),
        (Category::Ram, "Corsair Vengeance 32 GB"),
        (Category::Storage, "Samsung 990 Pro"),
        (Category::Psu, "Corsair RM850x"),
        (Category::Case, "Fractal Design North"),
        (Category::Cooler, "Arctic Liquid Freezer III 360"),
    ] {
        build.select(pick(category, name));
    }

    assert!(build.is_complete());
    // 120 + 450 + 50 + 2*5 + 10 + 10 + 15
    assert_eq!(estimate_system_wattage(&build), 665);
    assert!(validate_build(&build).is_empty());
}

#[test]
fn mismatched_build_reports_every_issue_once_in_order() {
    let build = Build::new()
        .with(pick(Category::Cpu, "Intel Core i7-14700K"))
        .with(pick(Category::Gpu, "ASUS TUF Gaming OC"))
        .with(pick(Category::Motherboard, "MSI MAG B650 TOMAHAWK WIFI"))
        .with(pick(Category::Psu, "EVGA 500 W1"))
        .with(pick(Category::Case, "Cooler Master NR200P"));

    // 125 + 450 + 50 + 10
    assert_eq!(
        validate_build(&build),
        vec![
            "Socket Mismatch: CPU is LGA1700, Board is AM5".to_string(),
            "Weak PSU: System needs ~635W, but PSU is only 500W".to_string(),
            "Size Mismatch: ATX motherboard likely won't fit in Mini ITX Tower case.".to_string(),
        ]
    );
}

#[test]
fn unknown_cpu_never_conflicts() {
    let raw = vec![json!({"name": "Mystery Chip 9000", "price": 99.0, "tdp": 65})];
    let cpus = normalize_catalog(&raw, Category::Cpu);
    let Part::Cpu(cpu) = &cpus[0] else {
        panic!("expected a CPU");
    };
    assert_eq!(cpu.socket, "Unknown");

    let build = Build::new()
        .with(cpus[0].clone())
        .with(pick(Category::Motherboard, "Gigabyte B550M DS3H"));
    assert!(validate_build(&build).is_empty());
}

#[test]
fn sample_gpu_estimates() {
    let watts: Vec<u32> = catalog(Category::Gpu)
        .iter()
        .filter_map(|p| match p {
            Part::Gpu(gpu) => Some(estimate_gpu_wattage(gpu)),
            _ => None,
        })
        .collect();
    assert_eq!(watts, vec![450, 160, 263]);
}

#[test]
fn oversized_records_saturate_instead_of_overflowing() {
    let ram = normalize_catalog(
        &[json!({"name": "Huge", "price": 1, "speed": [5, 6000], "modules": [1_000_000_000, 1]})],
        Category::Ram,
    );
    let cpu = normalize_catalog(
        &[json!({"name": "AMD Ryzen 9 9950X", "price": 1, "tdp": 4_294_967_295u64})],
        Category::Cpu,
    );
    let build = Build::new()
        .with(ram[0].clone())
        .with(cpu[0].clone())
        .with(pick(Category::Motherboard, "MSI MAG B650 TOMAHAWK WIFI"))
        .with(pick(Category::Psu, "Corsair RM850x"));

    assert_eq!(estimate_system_wattage(&build), u32::MAX);
    assert_eq!(
        validate_build(&build),
        vec![format!("Weak PSU: System needs ~{}W, but PSU is only 850W", u32::MAX)]
    );
}
