use super::*;
use crate::fake_tool::FakeTool;
use crate::log_capture::capture;
use log::Level;
use mamecat_core::{CategoryDetail, DriverStatus, NoCategories};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn verified(list: &[(&str, &str)]) -> VerifiedSets {
    list.iter()
        .map(|(name, parent)| (name.to_string(), parent.to_string()))
        .collect()
}

/// The attributes and children a fake machine gets, chosen by name prefix.
fn machine_xml(name: &str) -> String {
    let (attrs, driver) = match name {
        n if n.starts_with("dev") => (r#" isdevice="yes""#, r#"<driver status="good"/>"#),
        n if n.starts_with("bios") => (r#" isbios="yes""#, r#"<driver status="good"/>"#),
        n if n.starts_with("mech") => (r#" ismechanical="yes""#, r#"<driver status="good"/>"#),
        n if n.starts_with("norun") => (r#" runnable="no""#, r#"<driver status="good"/>"#),
        n if n.starts_with("nodrv") => ("", ""),
        n if n.starts_with("imp") => ("", r#"<driver status="imperfect"/>"#),
        n if n.starts_with("pre") => ("", r#"<driver status="preliminary"/>"#),
        _ => ("", r#"<driver status="good"/>"#),
    };
    format!(
        r#"<machine name="{name}"{attrs}><description>{name} game</description><year>1981</year><display rotate="270"/>{driver}</machine>"#
    )
}

fn listxml(args: &[String]) -> String {
    let body: String = args.iter().skip(1).map(|n| machine_xml(n)).collect();
    format!("<?xml version=\"1.0\"?>\n<mame build=\"test\">{body}</mame>\n")
}

struct Fixed;

impl CategorySource for Fixed {
    fn category(&self, _name: &str) -> CategoryDetail {
        CategoryDetail {
            category: "Shooter".into(),
            subcategory: "Flying Vertical".into(),
        }
    }
}

#[test]
fn validity_rules_apply_in_order() {
    let mut record = MachineRecord::new("x");
    record.is_device = true;
    record.is_bios = true;
    assert_eq!(check_validity(&record, None), Err(Rejection::Device));

    let mut record = MachineRecord::new("x");
    record.is_mechanical = true;
    record.runnable = false;
    assert_eq!(check_validity(&record, None), Err(Rejection::Mechanical));

    let record = MachineRecord::new("x");
    assert_eq!(check_validity(&record, None), Err(Rejection::NoDriver));
}

#[test]
fn status_matters_only_when_required() {
    let mut record = MachineRecord::new("x");
    record.status = Some("preliminary".into());
    let accepted = AcceptedStatuses::default();
    assert_eq!(
        check_validity(&record, Some(&accepted)),
        Err(Rejection::Status("preliminary".into()))
    );
    assert_eq!(check_validity(&record, None), Ok(()));
}

#[test]
fn build_keeps_only_playable_machines() {
    let tool = FakeTool::new(listxml);
    let builder = CatalogBuilder::new(&tool, Fixed);
    let roms = names(&[
        "pacman", "devz80", "biosneo", "mechpin", "norunx", "nodrvy", "impsf2", "missing",
    ]);
    let sets = verified(&[
        ("pacman", "puckman"),
        ("devz80", ""),
        ("biosneo", ""),
        ("mechpin", ""),
        ("norunx", ""),
        ("nodrvy", ""),
        ("impsf2", ""),
    ]);

    let entries = builder.build(&roms, &sets, &mut |_| {}).unwrap();

    assert_eq!(entries.len(), 1);
    let pacman = &entries[0];
    assert_eq!(pacman.name, "pacman");
    assert_eq!(pacman.clone_of, "puckman");
    assert_eq!(pacman.description, "pacman game");
    assert_eq!(pacman.rotation, "270");
    assert_eq!(pacman.status, "good");
    assert_eq!(pacman.category, "Shooter");
    assert_eq!(pacman.subcategory, "Flying Vertical");
}

#[test]
fn imperfect_machines_can_be_accepted() {
    let tool = FakeTool::new(listxml);
    let options = CatalogOptions {
        accepted_statuses: AcceptedStatuses::new([DriverStatus::Good, DriverStatus::Imperfect]),
        ..CatalogOptions::default()
    };
    let builder = CatalogBuilder::new(&tool, NoCategories).with_options(options);
    let roms = names(&["impsf2", "prex"]);
    let sets = verified(&[("impsf2", ""), ("prex", "")]);

    let entries = builder.build(&roms, &sets, &mut |_| {}).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "impsf2");
    assert_eq!(entries[0].category, "");
}

#[test]
fn details_progress_starts_after_unverified_sets() {
    let tool = FakeTool::new(listxml);
    let options = CatalogOptions {
        detail_batch_size: 1,
        ..CatalogOptions::default()
    };
    let builder = CatalogBuilder::new(&tool, NoCategories).with_options(options);
    let roms = names(&["a", "b", "c", "d"]);
    let sets = verified(&[("a", ""), ("b", "")]);
    let mut seen = Vec::new();

    builder.build(&roms, &sets, &mut |p| seen.push(p)).unwrap();

    // Two of four were never verified, so the first batch lands at 3/4.
    assert_eq!(seen, vec![88, 100, 100]);
}

#[test]
fn nothing_verified_finishes_the_build() {
    let tool = FakeTool::new(listxml);
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let mut seen = Vec::new();

    let entries = builder
        .build(&names(&["a"]), &VerifiedSets::new(), &mut |p| seen.push(p))
        .unwrap();

    assert!(entries.is_empty());
    assert!(tool.calls().is_empty());
    assert_eq!(seen, vec![100]);
}

#[test]
fn malformed_batch_is_refetched_one_name_at_a_time() {
    // Several names produce one document each, which is not valid XML.
    let tool = FakeTool::new(|args: &[String]| {
        args.iter()
            .skip(1)
            .map(|n| listxml(&["-listxml".to_string(), n.clone()]))
            .collect()
    });
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let roms = names(&["a", "b", "c"]);
    let sets = verified(&[("a", ""), ("b", ""), ("c", "")]);

    let entries = builder.build(&roms, &sets, &mut |_| {}).unwrap();

    let got: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(got, vec!["a", "b", "c"]);
    let batch_lengths: Vec<usize> = tool.calls().iter().map(|c| c.len() - 1).collect();
    assert_eq!(batch_lengths, vec![3, 1, 1, 1]);
}

#[test]
fn malformed_single_names_are_fatal() {
    let tool = FakeTool::constant("<mame><machine name=\"a\">");
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let sets = verified(&[("a", ""), ("b", "")]);

    let result = builder.build(&names(&["a", "b"]), &sets, &mut |_| {});

    assert!(matches!(result, Err(CatalogError::MalformedToolOutput(_))));
    // One batched pass, then the single-name pass stops at its first failure.
    assert_eq!(tool.calls().len(), 2);
}

#[test]
fn repeated_machines_are_listed_once() {
    let tool = FakeTool::new(|_: &[String]| {
        listxml(&["-listxml".to_string(), "pacman".to_string(), "pacman".to_string()])
    });
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let sets = verified(&[("pacman", "")]);

    let entries = builder.build(&names(&["pacman"]), &sets, &mut |_| {}).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn lookup_ignores_status_and_devices() {
    let tool = FakeTool::new(|_: &[String]| {
        listxml(&["-listxml".to_string(), "prex".to_string(), "devz80".to_string()])
    });
    let builder = CatalogBuilder::new(&tool, Fixed);

    let entry = builder.lookup("prex").unwrap();

    assert_eq!(entry.name, "prex");
    assert_eq!(entry.status, "preliminary");
    assert_eq!(entry.category, "Shooter");
    assert_eq!(tool.calls(), vec![vec!["-listxml", "prex"]]);
}

#[test]
fn lookup_of_unplayable_machine_fails() {
    let tool = FakeTool::new(listxml);
    let builder = CatalogBuilder::new(&tool, NoCategories);
    assert!(matches!(
        builder.lookup("biosneo"),
        Err(CatalogError::MachineNotFound(name)) if name == "biosneo"
    ));
}

#[test]
fn build_catalog_runs_both_phases() {
    let roms = tempfile::tempdir().unwrap();
    for name in ["pacman", "galaga", "broken"] {
        std::fs::write(roms.path().join(format!("{name}.zip")), b"").unwrap();
    }
    let rompath = roms.path().display().to_string();
    let tool = FakeTool::new(move |args: &[String]| match args[0].as_str() {
        "-showconfig" => format!("rompath  {rompath}\n"),
        "-verifyroms" => args
            .iter()
            .skip(1)
            .filter(|n| n.as_str() != "broken")
            .map(|n| format!("romset {n} is good\n"))
            .collect(),
        _ => listxml(args),
    });
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let mut seen = Vec::new();

    let entries = builder.build_catalog(&mut |p| seen.push(p)).unwrap();

    let got: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(got, vec!["galaga", "pacman"]);
    assert_eq!(seen.first(), Some(&50));
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn rejected_machines_are_only_logged_at_debug() {
    let tool = FakeTool::new(listxml);
    let builder = CatalogBuilder::new(&tool, NoCategories);
    let roms: Vec<String> = (0..200).map(|i| format!("imp{i:03}")).collect();
    let sets: VerifiedSets = roms.iter().map(|n| (n.clone(), String::new())).collect();

    let mut entries = Vec::new();
    let records = capture(|| {
        entries = builder.build(&roms, &sets, &mut |_| {}).unwrap();
    });

    assert!(entries.is_empty());
    let rejected = records
        .iter()
        .filter(|(_, message)| message.contains("not added"))
        .collect::<Vec<_>>();
    assert_eq!(rejected.len(), 200);
    assert!(rejected.iter().all(|(level, _)| *level == Level::Debug));
    // Only the closing summary reaches info.
    let info = records.iter().filter(|(level, _)| *level <= Level::Info).count();
    assert_eq!(info, 1);
}
