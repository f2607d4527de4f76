use table_lens::data::sort_engine::{SortDirection, SortEngine};
use table_lens::data::table::Table;

fn emissions() -> Table {
    let rows = [
        ["Deutschland", "675,4", "Europa"],
        ["Österreich", "62,1", "Europa"],
        ["China", "11.472,4", "Asien"],
        ["Ägypten", "249", "Afrika"],
        ["Indien", "2.709,7", "Asien"],
        ["Zypern", "6,8", "Europa"],
    ];
    Table::new(
        vec!["Land".to_string(), "CO2 (Mt)".to_string(), "Region".to_string()],
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

fn column(table: &Table, idx: usize) -> Vec<&str> {
    table.rows().iter().map(|r| r.cell_text(idx)).collect()
}

#[test]
fn test_tri_state_cycle_repeats() {
    let mut table = emissions();
    let engine = SortEngine::new();

    let expected = [
        SortDirection::Ascending,
        SortDirection::Descending,
        SortDirection::None,
    ];
    for round in 0..3 {
        for direction in expected {
            let state = engine.activate_column(&mut table, 1);
            assert_eq!(state.direction, direction, "round {}", round);
            if direction == SortDirection::None {
                assert_eq!(state.column, None);
            } else {
                assert_eq!(state.column, Some(1));
            }
        }
    }
}

#[test]
fn test_reset_restores_initial_order_after_mixed_sorting() {
    let mut table = emissions();
    let initial = table.order();
    let engine = SortEngine::new();

    // Sort other columns first so the prior order is far from the original
    engine.activate_column(&mut table, 0);
    engine.activate_column(&mut table, 2);
    engine.activate_column(&mut table, 2);
    engine.activate_column(&mut table, 1);
    engine.activate_column(&mut table, 1);
    assert_ne!(table.order(), initial);

    engine.activate_column(&mut table, 1);
    assert_eq!(table.order(), initial);
    assert!(table.sort_state().attributes().is_none());
    assert!(table.header_labels().iter().all(|l| l.ends_with(" ↕")));
}

#[test]
fn test_german_numbers_sort_numerically() {
    let mut table = emissions();
    SortEngine::new().activate_column(&mut table, 1);
    assert_eq!(
        column(&table, 1),
        vec!["6,8", "62,1", "249", "675,4", "2.709,7", "11.472,4"]
    );
}

#[test]
fn test_umlauts_collate_with_base_letters() {
    let mut table = emissions();
    SortEngine::new().activate_column(&mut table, 0);
    assert_eq!(
        column(&table, 0),
        vec!["Ägypten", "China", "Deutschland", "Indien", "Österreich", "Zypern"]
    );
}

#[test]
fn test_stable_for_duplicate_keys() {
    let mut table = emissions();
    let engine = SortEngine::new();

    // Order by country first, then by region: countries within a region
    // must stay alphabetical
    engine.activate_column(&mut table, 0);
    engine.activate_column(&mut table, 2);
    assert_eq!(
        column(&table, 0),
        vec!["Ägypten", "China", "Indien", "Deutschland", "Österreich", "Zypern"]
    );

    // Descending keeps ties in their prior relative order as well
    engine.activate_column(&mut table, 2);
    assert_eq!(
        column(&table, 0),
        vec!["Deutschland", "Österreich", "Zypern", "China", "Indien", "Ägypten"]
    );
}

#[test]
fn test_only_active_header_is_decorated() {
    let mut table = emissions();
    let engine = SortEngine::new();

    engine.activate_column(&mut table, 0);
    engine.activate_column(&mut table, 2);
    engine.activate_column(&mut table, 2);

    assert_eq!(
        table.header_labels(),
        vec!["Land ↕", "CO2 (Mt) ↕", "Region ▼"]
    );
    let attrs = table.sort_state().attributes().unwrap();
    assert_eq!(attrs[0].1, "2");
    assert_eq!(attrs[1].1, "desc");
}
