//! Test the actual app data flow without the TUI

// The glint binary is not importable from an integration test, so this
// mirrors the dashboard flow with the same structures and rules

mod test_app_flow {
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tab {
        Browse,
        Dashboard,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum DataMode {
        Mock,
        Api,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct ParamInfo {
        id: String,
        slug: String,
        value: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct CardInfo {
        id: u64,
        row: u32,
        col: u32,
        size_x: u32,
        size_y: u32,
        is_dirty: bool,
    }

    // Simplified App structure matching the real one
    struct App {
        current_tab: Tab,
        data_mode: DataMode,
        dashboard: Option<u64>,
        parameters: Vec<ParamInfo>,
        cards: Vec<CardInfo>,
        editing: bool,
        layout_backup: Option<Vec<CardInfo>>,
        pending_card_round: Option<u64>,
        selected_card: usize,
    }

    impl App {
        fn new() -> Self {
            Self {
                current_tab: Tab::Browse,
                data_mode: DataMode::Mock,
                dashboard: None,
                parameters: Vec::new(),
                cards: Vec::new(),
                editing: false,
                layout_backup: None,
                pending_card_round: None,
                selected_card: 0,
            }
        }

        fn ordered_cards(&self) -> Vec<&CardInfo> {
            let mut cards: Vec<&CardInfo> = self.cards.iter().collect();
            cards.sort_by_key(|c| (c.row, c.col, c.id));
            cards
        }

        fn selected_card(&self) -> Option<&CardInfo> {
            self.ordered_cards().get(self.selected_card).copied()
        }

        fn open_dashboard(&mut self, id: u64, parameters: Vec<ParamInfo>, cards: Vec<CardInfo>) {
            println!(
                "[open_dashboard] id={}, {} params, {} cards",
                id,
                parameters.len(),
                cards.len()
            );
            self.dashboard = Some(id);
            self.parameters = parameters;
            self.cards = cards;
            self.current_tab = Tab::Dashboard;
            self.selected_card = 0;
            self.editing = false;
            self.layout_backup = None;
            self.pending_card_round = Some(id);
        }

        fn set_filter(&mut self, parameter_id: &str, value: &str) {
            println!("[set_filter] {}={}", parameter_id, value);
            if let Some(param) = self.parameters.iter_mut().find(|p| p.id == parameter_id) {
                param.value = Some(value.to_string());
                self.pending_card_round = self.dashboard;
            }
        }

        fn clear_filter(&mut self, parameter_id: &str) {
            println!("[clear_filter] {}", parameter_id);
            if let Some(param) = self.parameters.iter_mut().find(|p| p.id == parameter_id) {
                param.value = None;
                self.pending_card_round = self.dashboard;
            }
        }

        fn remove_parameter(&mut self, parameter_id: &str) {
            println!("[remove_parameter] {}", parameter_id);
            self.parameters.retain(|p| p.id != parameter_id);
        }

        fn applied_values(&self) -> BTreeMap<String, String> {
            self.parameters
                .iter()
                .filter_map(|p| p.value.clone().map(|v| (p.id.clone(), v)))
                .collect()
        }

        fn enter_edit(&mut self) {
            println!("[enter_edit] backing up {} cards", self.cards.len());
            self.editing = true;
            self.layout_backup = Some(self.cards.clone());
        }

        fn nudge_card(&mut self, dx: i64, dy: i64) {
            let Some(selected) = self.selected_card().map(|c| c.id) else {
                return;
            };
            println!("[nudge_card] card {} by ({}, {})", selected, dx, dy);
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == selected) {
                card.col = (card.col as i64 + dx).max(0) as u32;
                card.row = (card.row as i64 + dy).max(0) as u32;
                card.is_dirty = true;
            }
        }

        fn cancel_edit(&mut self) {
            println!("[cancel_edit] restoring layout");
            if let Some(backup) = self.layout_backup.take() {
                self.cards = backup;
            }
            self.editing = false;
        }

        fn save_edit(&mut self) {
            println!("[save_edit] {} cards persisted", self.cards.len());
            for card in &mut self.cards {
                card.is_dirty = false;
            }
            self.editing = false;
            self.layout_backup = None;
        }
    }

    fn sample_cards() -> Vec<CardInfo> {
        vec![
            CardInfo { id: 1, row: 0, col: 0, size_x: 6, size_y: 4, is_dirty: false },
            CardInfo { id: 2, row: 0, col: 6, size_x: 6, size_y: 4, is_dirty: false },
            CardInfo { id: 3, row: 4, col: 0, size_x: 12, size_y: 4, is_dirty: false },
        ]
    }

    fn sample_parameters() -> Vec<ParamInfo> {
        vec![
            ParamInfo { id: "p-region".to_string(), slug: "region".to_string(), value: None },
            ParamInfo { id: "p-date".to_string(), slug: "date".to_string(), value: None },
        ]
    }

    #[test]
    fn test_full_dashboard_flow() {
        println!("\n=== Test: Full Dashboard Flow ===\n");

        let mut app = App::new();

        // Verify initial state
        println!("1. Initial state (Browse tab)");
        assert_eq!(app.current_tab, Tab::Browse);
        assert!(app.dashboard.is_none());
        assert!(app.selected_card().is_none());
        println!("   ✓ Initial state correct\n");

        // Open a dashboard
        println!("2. Open dashboard 42");
        app.open_dashboard(42, sample_parameters(), sample_cards());
        assert_eq!(app.current_tab, Tab::Dashboard);
        assert_eq!(app.dashboard, Some(42));
        // Opening a dashboard queues one round of card queries
        assert_eq!(app.pending_card_round.take(), Some(42));
        println!("   ✓ Dashboard opened, card round queued\n");

        // Check the ordered grid
        println!("3. Check card ordering (row-major)");
        let ordered: Vec<u64> = app.ordered_cards().iter().map(|c| c.id).collect();
        println!("   ordered card ids: {:?}", ordered);
        assert_eq!(ordered, vec![1, 2, 3]);
        let selected = app.selected_card();
        assert!(selected.is_some());
        assert_eq!(selected.unwrap().id, 1);
        println!("   ✓ Cards ordered and first card selected\n");

        // Apply a filter
        println!("4. Apply region filter");
        app.set_filter("p-region", "west");
        assert_eq!(app.pending_card_round.take(), Some(42));
        let applied = app.applied_values();
        println!("   applied: {:?}", applied);
        assert_eq!(applied.get("p-region").map(String::as_str), Some("west"));
        assert!(!applied.contains_key("p-date"));
        println!("   ✓ Filter applied, cards rerun with the new value\n");

        // Clear it again
        println!("5. Clear region filter");
        app.clear_filter("p-region");
        assert_eq!(app.pending_card_round.take(), Some(42));
        assert!(app.applied_values().is_empty());
        println!("   ✓ Filter cleared, cards rerun\n");

        println!("=== ALL TESTS PASSED ===\n");
    }

    #[test]
    fn test_edit_cancel_restores_layout() {
        println!("\n=== Test: Edit / Cancel Layout ===\n");

        let mut app = App::new();
        app.open_dashboard(7, sample_parameters(), sample_cards());
        let original = app.cards.clone();

        println!("1. Enter edit mode");
        app.enter_edit();
        assert!(app.editing);
        assert!(app.layout_backup.is_some());
        println!("   ✓ Edit mode on, layout backed up\n");

        println!("2. Nudge the selected card right and down");
        app.nudge_card(1, 0);
        // The first nudge leaves card 1 sorted first, so the second
        // nudge still moves the same card
        app.nudge_card(0, 1);
        let moved = app.cards.iter().find(|c| c.id == 1).cloned();
        println!("   moved card: {:?}", moved);
        assert_eq!(moved.as_ref().map(|c| (c.row, c.col)), Some((1, 1)));
        assert!(app.cards.iter().any(|c| c.is_dirty));
        assert_ne!(app.cards, original);
        println!("   ✓ Card moved and marked dirty\n");

        println!("3. Cancel edit mode");
        app.cancel_edit();
        assert!(!app.editing);
        assert_eq!(app.cards, original, "Cancel must restore the saved layout!");
        assert!(app.cards.iter().all(|c| !c.is_dirty));
        println!("   ✓ Original layout restored\n");

        println!("4. Edit again, nudge, then save");
        app.enter_edit();
        app.nudge_card(1, 0);
        assert!(app.cards.iter().any(|c| c.is_dirty));
        app.save_edit();
        assert!(!app.editing);
        assert!(app.layout_backup.is_none());
        assert!(app.cards.iter().all(|c| !c.is_dirty));
        assert_ne!(app.cards, original);
        println!("   ✓ Save kept the new layout and cleared dirty flags\n");

        println!("=== ALL TESTS PASSED ===\n");
    }

    #[test]
    fn test_removed_filter_drops_value() {
        println!("\n=== Test: Removed Filter Drops Its Value ===\n");

        let mut app = App::new();
        app.open_dashboard(9, sample_parameters(), sample_cards());

        println!("1. Apply values to both filters");
        app.set_filter("p-region", "east");
        app.set_filter("p-date", "2024-01-01");
        assert_eq!(app.applied_values().len(), 2);
        println!("   ✓ Both filters hold values\n");

        println!("2. Remove the region filter definition");
        app.remove_parameter("p-region");
        let applied = app.applied_values();
        println!("   applied after removal: {:?}", applied);
        assert!(
            !applied.contains_key("p-region"),
            "Removed filter must not leave a value behind!"
        );
        assert_eq!(applied.get("p-date").map(String::as_str), Some("2024-01-01"));
        println!("   ✓ Stale value gone, the other filter untouched\n");

        println!("3. Slugs stay unique for the remaining filters");
        let mut slugs: Vec<&str> = app.parameters.iter().map(|p| p.slug.as_str()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), app.parameters.len());
        println!("   ✓ No duplicate slugs\n");

        println!("=== ALL TESTS PASSED ===\n");
    }

    #[test]
    fn test_data_mode_switch_clears_state() {
        println!("\n=== Test: Connect Clears Seeded Data ===\n");

        let mut app = App::new();
        app.open_dashboard(3, sample_parameters(), sample_cards());
        assert_eq!(app.data_mode, DataMode::Mock);

        // Connecting to a server drops everything seeded locally
        println!("1. Switch to Api mode");
        app.data_mode = DataMode::Api;
        app.dashboard = None;
        app.parameters.clear();
        app.cards.clear();
        app.selected_card = 0;

        assert!(app.selected_card().is_none());
        assert!(app.applied_values().is_empty());
        println!("   ✓ No stale selection after the switch\n");

        println!("=== ALL TESTS PASSED ===\n");
    }
}
