use osrs_profit_core::models::filter::{FilterCriteria, FilterOutcome};
use osrs_profit_core::models::item::{Item, ItemTable, MappingEntry};
use osrs_profit_core::models::price::{PriceRecord, PriceSnapshot, SnapshotWindow};
use osrs_profit_core::models::profit::{PriceStatus, ProfitResult, SortOrder};
use osrs_profit_core::models::recipe::{Ingredient, Recipe, CUSTOM_RECIPE_NAME};
use osrs_profit_core::models::settings::{Settings, DEFAULT_DATA_LOCATION, DEFAULT_HISCORES_URL};
use osrs_profit_core::models::skills::{Skill, SkillLevels};
use osrs_profit_core::models::tax::TaxExemptSet;
use std::collections::{BTreeMap, HashMap};

fn item(id: u32, name: &str) -> Item {
    Item {
        id,
        name: name.to_string(),
        members: None,
        limit: None,
        high_alch: None,
        max_high: 100,
        min_low: Some(90),
        current_high: 101,
        current_low: 89,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SnapshotWindow
// ═══════════════════════════════════════════════════════════════════

mod snapshot_window {
    use super::*;

    #[test]
    fn latest_is_first() {
        assert_eq!(SnapshotWindow::ALL[0], SnapshotWindow::Latest);
        assert_eq!(SnapshotWindow::ALL.len(), 7);
    }

    #[test]
    fn file_names() {
        let names: Vec<&str> = SnapshotWindow::ALL.iter().map(|w| w.file_name()).collect();
        assert_eq!(
            names,
            vec!["latest.json", "5m.json", "10m.json", "30m.json", "1h.json", "6h.json", "24h.json"]
        );
    }

    #[test]
    fn display() {
        assert_eq!(SnapshotWindow::Latest.to_string(), "latest");
        assert_eq!(SnapshotWindow::ThirtyMinutes.to_string(), "30m");
        assert_eq!(SnapshotWindow::TwentyFourHours.to_string(), "24h");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceRecord / PriceSnapshot
// ═══════════════════════════════════════════════════════════════════

mod price_record {
    use super::*;

    #[test]
    fn instant_record_uses_high_and_low() {
        let r = PriceRecord::instant(Some(120), Some(110));
        assert_eq!(r.sell_price(), Some(120));
        assert_eq!(r.buy_price(), Some(110));
    }

    #[test]
    fn average_takes_precedence_over_instant() {
        let r = PriceRecord {
            high: Some(500),
            low: Some(400),
            avg_high_price: Some(450),
            avg_low_price: Some(420),
        };
        assert_eq!(r.sell_price(), Some(450));
        assert_eq!(r.buy_price(), Some(420));
    }

    #[test]
    fn zero_average_falls_back_to_instant() {
        let r = PriceRecord {
            high: Some(500),
            low: Some(400),
            avg_high_price: Some(0),
            avg_low_price: None,
        };
        assert_eq!(r.sell_price(), Some(500));
        assert_eq!(r.buy_price(), Some(400));
    }

    #[test]
    fn zero_and_null_mean_no_price() {
        let r = PriceRecord::instant(Some(0), None);
        assert_eq!(r.sell_price(), None);
        assert_eq!(r.buy_price(), None);
    }

    #[test]
    fn parse_latest_snapshot_json() {
        let json = r#"{"data":{"2":{"high":180,"highTime":1700000000,"low":175,"lowTime":1700000001}}}"#;
        let snap: PriceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get(2), Some(&PriceRecord::instant(Some(180), Some(175))));
        assert!(snap.timestamp.is_none());
    }

    #[test]
    fn parse_window_snapshot_json_with_nulls() {
        let json = r#"{
            "data": {
                "453": {"avgHighPrice": 150, "highPriceVolume": 10, "avgLowPrice": null, "lowPriceVolume": 0}
            },
            "timestamp": 1700000000
        }"#;
        let snap: PriceSnapshot = serde_json::from_str(json).unwrap();
        let rec = snap.get(453).unwrap();
        assert_eq!(rec.sell_price(), Some(150));
        assert_eq!(rec.buy_price(), None);
        assert_eq!(snap.timestamp, Some(1_700_000_000));
    }

    #[test]
    fn missing_id_is_none() {
        let snap = PriceSnapshot::new().with(1, PriceRecord::instant(Some(5), Some(4)));
        assert!(snap.get(2).is_none());
        assert!(!snap.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MappingEntry / ItemTable
// ═══════════════════════════════════════════════════════════════════

mod item_table {
    use super::*;

    #[test]
    fn mapping_entry_ignores_unknown_fields() {
        let json = r#"[{"examine":"Hard.","id":453,"members":false,"lowalch":6,"limit":13000,
                        "value":15,"highalch":9,"icon":"Coal.png","name":"Coal"}]"#;
        let entries: Vec<MappingEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 453);
        assert_eq!(entries[0].name, "Coal");
        assert_eq!(entries[0].limit, Some(13000));
        assert_eq!(entries[0].highalch, Some(9));
    }

    #[test]
    fn mapping_entry_minimal() {
        let entry: MappingEntry = serde_json::from_str(r#"{"id":1,"name":"Thing"}"#).unwrap();
        assert_eq!(entry, MappingEntry::new(1, "Thing"));
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let table: ItemTable = vec![item(440, "Iron ore")].into_iter().collect();
        assert_eq!(table.find_by_name("iron ore").unwrap().id, 440);
        assert_eq!(table.find_by_name("IRON ORE").unwrap().id, 440);
        assert!(table.find_by_name("Iron").is_none());
    }

    #[test]
    fn get_by_id() {
        let table: ItemTable = vec![item(1, "A"), item(2, "B")].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2).unwrap().name, "B");
        assert!(table.get(3).is_none());
    }

    #[test]
    fn later_duplicate_name_wins_name_slot() {
        let table: ItemTable = vec![item(1, "Dup"), item(2, "dup")].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_by_name("DUP").unwrap().id, 2);
    }

    #[test]
    fn empty_table() {
        let table = ItemTable::new();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn has_buy_price() {
        let mut i = item(1, "A");
        assert!(i.has_buy_price());
        i.min_low = None;
        assert!(!i.has_buy_price());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TaxExemptSet
// ═══════════════════════════════════════════════════════════════════

mod tax_exempt_set {
    use super::*;

    #[test]
    fn parse_from_json() {
        let json = r#"{"Old school bond": true, "Chisel": true, "Coal": false}"#;
        let set: TaxExemptSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.is_exempt("Old school bond"));
        assert!(set.is_exempt("chisel"));
        assert!(!set.is_exempt("Coal"));
        assert!(!set.is_exempt("Steel bar"));
    }

    #[test]
    fn default_is_empty() {
        let set = TaxExemptSet::default();
        assert!(set.is_empty());
        assert!(!set.is_exempt("anything"));
    }

    #[test]
    fn from_names() {
        let set: TaxExemptSet = ["Hammer", "Saw"].into_iter().collect();
        assert!(set.is_exempt("HAMMER"));
        assert!(set.is_exempt("saw"));
    }

    #[test]
    fn serializes_back_to_map() {
        let mut set = TaxExemptSet::new();
        set.insert("Chisel", true);
        let json = serde_json::to_string(&set).unwrap();
        let raw: HashMap<String, bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.get("chisel"), Some(&true));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Recipe
// ═══════════════════════════════════════════════════════════════════

mod recipe {
    use super::*;

    #[test]
    fn parse_recipe_json() {
        let json = r#"[{
            "name": "Steel bar",
            "inputs": [{"item": "Iron ore", "quantity": 1}, {"item": "Coal", "quantity": 2}],
            "output": {"item": "Steel bar", "quantity": 1},
            "requiredSkills": {"Smithing": 30}
        }]"#;
        let recipes: Vec<Recipe> = serde_json::from_str(json).unwrap();
        let r = &recipes[0];
        assert_eq!(r.name, "Steel bar");
        assert_eq!(r.inputs[1], Ingredient::new("Coal", 2));
        assert_eq!(r.output, Ingredient::new("Steel bar", 1));
        assert_eq!(r.required_skills.get("Smithing"), Some(&30));
        assert!(r.has_requirements());
    }

    #[test]
    fn required_skills_optional() {
        let json = r#"{"name":"x","inputs":[],"output":{"item":"y","quantity":1}}"#;
        let r: Recipe = serde_json::from_str(json).unwrap();
        assert!(!r.has_requirements());
        let back = serde_json::to_string(&r).unwrap();
        assert!(!back.contains("requiredSkills"));
    }

    #[test]
    fn null_required_skills_means_none() {
        let json = r#"[{"name":"x","inputs":[],"output":{"item":"y","quantity":1},"requiredSkills":null}]"#;
        let recipes: Vec<Recipe> = serde_json::from_str(json).unwrap();
        assert!(!recipes[0].has_requirements());
    }

    #[test]
    fn builder_requirements() {
        let r = Recipe::new("Gold bar", vec![Ingredient::new("Gold ore", 1)], Ingredient::new("Gold bar", 1))
            .requires("Smithing", 40)
            .requires("Mining", 1);
        let expected: BTreeMap<String, u32> =
            [("Mining".to_string(), 1), ("Smithing".to_string(), 40)].into_iter().collect();
        assert_eq!(r.required_skills, expected);
    }

    #[test]
    fn custom_recipe_detection() {
        let r = Recipe::new(CUSTOM_RECIPE_NAME, vec![], Ingredient::unquantified(""));
        assert!(r.is_custom());
        assert!(r.output.quantity.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Skills
// ═══════════════════════════════════════════════════════════════════

mod skills {
    use super::*;

    #[test]
    fn twenty_three_skills() {
        assert_eq!(Skill::ALL.len(), 23);
    }

    #[test]
    fn parse_display_and_api_names() {
        assert_eq!("Mining".parse::<Skill>().unwrap(), Skill::Mining);
        assert_eq!("mining".parse::<Skill>().unwrap(), Skill::Mining);
        assert_eq!("Runecraft".parse::<Skill>().unwrap(), Skill::Runecraft);
        assert_eq!("runecrafting".parse::<Skill>().unwrap(), Skill::Runecraft);
        assert!("Sailing".parse::<Skill>().is_err());
    }

    #[test]
    fn api_names() {
        assert_eq!(Skill::Runecraft.api_name(), "runecrafting");
        assert_eq!(Skill::Hitpoints.api_name(), "hitpoints");
        assert_eq!(Skill::Construction.to_string(), "Construction");
    }

    #[test]
    fn default_levels_are_99() {
        let levels = SkillLevels::default();
        assert!(Skill::ALL.iter().all(|s| levels.get(*s) == 99));
        assert_eq!(levels.total(), 2277);
    }

    #[test]
    fn set_clamps_to_range() {
        let mut levels = SkillLevels::default();
        assert_eq!(levels.set(Skill::Mining, 150), 99);
        assert_eq!(levels.set(Skill::Mining, 0), 1);
        assert_eq!(levels.set(Skill::Mining, -5), 1);
        assert_eq!(levels.set(Skill::Mining, 40), 40);
        assert_eq!(levels.get(Skill::Mining), 40);
        assert_eq!(levels.total(), 2277 - 59);
    }

    #[test]
    fn meets_requirements() {
        let mut levels = SkillLevels::default();
        levels.set(Skill::Mining, 40);
        assert!(levels.meets("Mining", 40));
        assert!(!levels.meets("Mining", 50));
        assert!(!levels.meets("Sailing", 1));
    }

    #[test]
    fn requirements_need_exact_display_name() {
        let levels = SkillLevels::default();
        assert!(levels.meets("Runecraft", 1));
        assert!(!levels.meets("mining", 1));
        assert!(!levels.meets("runecrafting", 1));
        assert!(!levels.meets(" Mining", 1));
        assert_eq!(Skill::from_display_name("Mining"), Some(Skill::Mining));
        assert_eq!(Skill::from_display_name("MINING"), None);
    }

    #[test]
    fn serde_is_lenient() {
        let json = r#"{"Mining": 40, "Smithing": 150, "Sailing": 10}"#;
        let levels: SkillLevels = serde_json::from_str(json).unwrap();
        assert_eq!(levels.get(Skill::Mining), 40);
        assert_eq!(levels.get(Skill::Smithing), 99);
        assert_eq!(levels.get(Skill::Attack), 99);
    }

    #[test]
    fn serializes_every_skill_by_name() {
        let levels = SkillLevels::uniform(1);
        let json = serde_json::to_string(&levels).unwrap();
        let raw: BTreeMap<String, u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.len(), 23);
        assert_eq!(raw.get("Runecraft"), Some(&1));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Results & filter outcome
// ═══════════════════════════════════════════════════════════════════

mod results {
    use super::*;

    fn result(profit: Option<i64>) -> ProfitResult {
        ProfitResult {
            recipe_name: "r".into(),
            output_item: "o".into(),
            output_quantity: Some(1),
            output_price: 0,
            gross_output_price: 0,
            net_output_price: 0,
            current_output_price: 0,
            output_status: PriceStatus::Priced,
            inputs: vec![],
            input_cost: profit.map(|_| 0),
            profit,
        }
    }

    #[test]
    fn profitable_only_when_positive() {
        assert!(result(Some(1)).is_profitable());
        assert!(!result(Some(0)).is_profitable());
        assert!(!result(Some(-10)).is_profitable());
        assert!(!result(None).is_profitable());
    }

    #[test]
    fn missing_prices_flag() {
        let mut r = result(Some(1));
        assert!(!r.has_missing_prices());
        r.output_status = PriceStatus::Unresolved;
        assert!(r.has_missing_prices());
    }

    #[test]
    fn price_status_display() {
        assert_eq!(PriceStatus::Unavailable.to_string(), "Price unavailable");
        assert_eq!(PriceStatus::Unresolved.to_string(), "Unknown item");
    }

    #[test]
    fn default_sort_order() {
        assert_eq!(SortOrder::default(), SortOrder::RecipeOrder);
    }

    #[test]
    fn hidden_message_none_when_nothing_hidden() {
        assert_eq!(FilterOutcome::default().hidden_message(), None);
    }

    #[test]
    fn hidden_message_singular() {
        let outcome = FilterOutcome {
            visible: vec![],
            hidden_by_skill: 1,
            hidden_by_cost: 0,
        };
        assert_eq!(
            outcome.hidden_message().unwrap(),
            "1 recipe hidden due to level requirements."
        );
    }

    #[test]
    fn hidden_message_both() {
        let outcome = FilterOutcome {
            visible: vec![],
            hidden_by_skill: 2,
            hidden_by_cost: 1,
        };
        assert_eq!(
            outcome.hidden_message().unwrap(),
            "2 recipes hidden due to level requirements. 1 recipe hidden due to cost limit."
        );
        assert_eq!(outcome.hidden_total(), 3);
    }

    #[test]
    fn hidden_message_cost_only() {
        let outcome = FilterOutcome {
            visible: vec![],
            hidden_by_skill: 0,
            hidden_by_cost: 4,
        };
        assert_eq!(
            outcome.hidden_message().unwrap(),
            "4 recipes hidden due to cost limit."
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.data_location, DEFAULT_DATA_LOCATION);
        assert_eq!(s.hiscores_url, DEFAULT_HISCORES_URL);
        assert_eq!(s.max_cost, None);
        assert!(!s.filter_by_skills);
        assert!(!s.auto_refresh);
        assert!(s.player_name.is_none());
        assert!(s.last_fetched.is_none());
        assert_eq!(s.skill_levels.total(), 2277);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"max_cost": 300, "filter_by_skills": true}"#).unwrap();
        assert_eq!(s.max_cost, Some(300));
        assert!(s.filter_by_skills);
        assert_eq!(s.data_location, DEFAULT_DATA_LOCATION);
    }

    #[test]
    fn filter_criteria_mirrors_settings() {
        let mut s = Settings::default();
        s.max_cost = Some(1000);
        s.filter_by_skills = true;
        s.skill_levels.set(Skill::Cooking, 10);
        let c: FilterCriteria = s.filter_criteria();
        assert_eq!(c.max_cost, Some(1000));
        assert!(c.filter_by_skills);
        assert_eq!(c.skill_levels.get(Skill::Cooking), 10);
    }
}
