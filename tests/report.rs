// tests/report.rs
use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;

use steno_scrape::model::{Intervention, InterventionRef, Session, Speaker, SpeakerRegistry, StenoPage, Topic};
use steno_scrape::report::{assemble, roster, roster_cells};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 6, 15).unwrap()
}

fn r(page: &str, tag: &str) -> InterventionRef {
    InterventionRef {
        page_ref: format!("{page}#{tag}"),
        steno_page: page.to_string(),
        ref_tag: tag.to_string(),
        date: day(),
    }
}

fn iv(steno: &str, text: &str, key: &str) -> Intervention {
    Intervention { steno_name: steno.into(), text: text.into(), speaker_key: key.into() }
}

fn session(topics: Vec<(&str, &str, Vec<InterventionRef>)>) -> Session {
    let mut map = IndexMap::new();
    for (id, title, refs) in topics {
        map.insert(id.to_string(), Topic { id: id.into(), title: title.into(), refs });
    }
    Session { number: 5, index_url: String::new(), topics: map }
}

fn registry() -> SpeakerRegistry {
    let mut reg = SpeakerRegistry::new();
    reg.ensure_stub("k1", "Poslanec_Jan_Novák");
    reg.complete(Speaker {
        key: "k1".into(),
        steno_name: "Poslanec_Jan_Novák".into(),
        name: "Jan Novák".into(),
        function: "Poslanec".into(),
        ..Default::default()
    });
    reg.ensure_stub("k2", "Poslankyně_Jana_Malá");
    reg
}

fn pages() -> HashMap<String, StenoPage> {
    let mut p1 = StenoPage::new();
    p1.insert("r1".into(), iv("Poslanec_Jan_Novák", "První.", "k1"));
    p1.insert("r2".into(), iv("Poslankyně_Jana_Malá", "Druhá.", "k2"));
    p1.insert("r3".into(), iv("Někdo", "Třetí.", "k-unknown"));
    HashMap::from([("s005001.htm".to_string(), p1)])
}

#[test]
fn rows_follow_topic_then_reference_order() {
    let s = session(vec![
        ("12", "Bod dvanáct", vec![r("s005001.htm", "r1"), r("s005001.htm", "r2")]),
        ("3", "Bod tři", vec![r("s005001.htm", "r1")]),
    ]);
    let rows = assemble(&s, &pages(), &registry());

    let names: Vec<_> = rows.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "s_005_20170615_t_012_i_001_Poslanec_Jan_Novák.txt",
            "s_005_20170615_t_012_i_002_Poslankyně_Jana_Malá.txt",
            "s_005_20170615_t_003_i_001_Poslanec_Jan_Novák.txt",
        ]
    );
    assert_eq!(rows[0].name, "Jan Novák");
    assert_eq!(rows[0].text, "První.");
    // Unresolved speaker keeps the row with a fallback name
    assert_eq!(rows[1].name, "Poslankyně Jana Malá");
    assert_eq!(
        rows[0].cells(),
        ["5", "20170615", "12", "Bod dvanáct", "1", "Jan Novák", "Poslanec_Jan_Novák", "s_005_20170615_t_012_i_001_Poslanec_Jan_Novák.txt"]
    );
}

#[test]
fn missing_data_omits_rows_and_keeps_numbering() {
    let s = session(vec![(
        "1",
        "Bod",
        vec![
            r("s005001.htm", "r1"),
            r("s005001.htm", "r99"),  // tag never extracted
            r("s005009.htm", "r1"),   // page never fetched
            r("s005001.htm", "r3"),   // speaker key unknown
            r("s005001.htm", "r2"),
        ],
    )]);
    let rows = assemble(&s, &pages(), &registry());
    let orders: Vec<_> = rows.iter().map(|r| r.order).collect();
    assert_eq!(orders, [1, 5]);
}

#[test]
fn roster_is_deduplicated_in_first_seen_order() {
    let s = session(vec![(
        "1",
        "Bod",
        vec![r("s005001.htm", "r2"), r("s005001.htm", "r1"), r("s005001.htm", "r2")],
    )]);
    let reg = registry();
    let rows = assemble(&s, &pages(), &reg);
    let keys: Vec<_> = roster(&rows, &reg).iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["k2", "k1"]);

    let cells = roster_cells(reg.get("k1").unwrap());
    assert_eq!(cells[0], "Jan Novák");
    assert_eq!(cells[2], "Poslanec");
    assert_eq!(cells[7], "http://www.psp.cz/k1");
}

#[test]
fn roster_keeps_the_steno_function() {
    let mut reg = SpeakerRegistry::new();
    reg.ensure_stub("k3", "Poslankyně_Jana_Černochová");
    reg.complete(Speaker {
        key: "k3".into(),
        steno_name: "Poslankyně_Jana_Černochová".into(),
        name: "Jana Černochová".into(),
        function: "Poslankyně".into(),
        ..Default::default()
    });
    let cells = roster_cells(reg.get("k3").unwrap());
    assert_eq!(cells[2], "Poslankyně");
}
