use super::*;
use crate::domain::{
    default_config, ChoiceConfig, FieldConfig, FieldKind, FieldPatch, FormAnswer, NewOption,
    OptionPatch, SectionPatch,
};
use crate::fixtures::{seed_document, SEED_SECTION_ID};
use crate::integrity::check_integrity;
use crate::selectors::flat_field_order;
use std::sync::atomic::AtomicUsize;

fn empty_store() -> (FormStore, String) {
    let store = FormStore::default();
    let section_id = store.snapshot().sections().keys().next().unwrap().clone();
    (store, section_id)
}

fn seeded_store() -> FormStore {
    FormStore::with_document(seed_document(), StoreConfig::default())
}

fn order(store: &FormStore, section_id: &str) -> Vec<String> {
    store.get_section(section_id).unwrap().field_order.clone()
}

#[test]
fn test_new_store_has_one_empty_section() {
    let (store, section_id) = empty_store();
    let doc = store.snapshot();
    assert_eq!(doc.sections().len(), 1);
    assert!(doc.fields().is_empty());
    assert!(order(&store, &section_id).is_empty());
    assert_eq!(store.version(), 0);
}

#[test]
fn test_field_lifecycle_scenario() {
    let (store, s) = empty_store();

    let field = FormField::new("f1", default_config(FieldKind::ShortAnswer));
    assert!(store.add_field(&s, field).is_applied());
    assert_eq!(order(&store, &s), vec!["f1"]);

    store.update_field("f1", FieldPatch::new().title("Name"));
    assert_eq!(store.get_field("f1").unwrap().title.as_deref(), Some("Name"));

    assert!(store.remove_field("f1").is_applied());
    assert!(store.get_field("f1").is_none());
    assert!(order(&store, &s).is_empty());
}

#[test]
fn test_add_then_remove_restores_document() {
    let store = seeded_store();
    let before = store.snapshot();

    store.add_field(
        SEED_SECTION_ID,
        FormField::new("extra", default_config(FieldKind::Rating)),
    );
    store.remove_field("extra");

    assert_eq!(*store.snapshot(), *before);
}

#[test]
fn test_remove_strips_from_order() {
    let (store, s) = empty_store();
    for id in ["a", "b", "c"] {
        store.add_field(&s, FormField::new(id, default_config(FieldKind::Date)));
    }
    store.remove_field("b");
    assert_eq!(order(&store, &s), vec!["a", "c"]);
    assert!(store.get_field("b").is_none());
}

#[test]
fn test_add_field_without_section_keeps_field() {
    let (store, s) = empty_store();
    let outcome = store.add_field("nope", FormField::new("f", default_config(FieldKind::Time)));
    assert!(outcome.is_applied());
    assert!(store.get_field("f").is_some());
    assert!(order(&store, &s).is_empty());
}

#[test]
fn test_add_existing_field_moves_it() {
    let store = seeded_store();
    store.add_section(Section::new("other", "Other"));
    store.add_field("other", FormField::new("0", default_config(FieldKind::ShortAnswer)));

    assert_eq!(order(&store, "other"), vec!["0"]);
    assert!(!order(&store, SEED_SECTION_ID).contains(&"0".to_string()));
    assert!(check_integrity(&store.snapshot()).is_empty());
}

#[test]
fn test_add_existing_field_to_missing_section_keeps_order() {
    let store = seeded_store();
    let before = order(&store, SEED_SECTION_ID);

    let outcome = store.add_field("nope", FormField::new("0", default_config(FieldKind::Date)));
    assert!(outcome.is_applied());
    assert_eq!(order(&store, SEED_SECTION_ID), before);
    assert_eq!(store.get_field("0").unwrap().kind(), Some(FieldKind::Date));
    assert!(check_integrity(&store.snapshot()).is_empty());
}

#[test]
fn test_insert_field_assigns_fresh_ids() {
    let store = seeded_store();
    let original = store.get_field("2").unwrap();

    let outcome = store.insert_field(1, &original);
    let new_id = outcome.created_id().unwrap().to_string();
    assert_ne!(new_id, "2");

    let copy = store.get_field(&new_id).unwrap();
    let old_ids = original.config.nested_ids();
    for id in copy.config.nested_ids() {
        assert!(!old_ids.contains(&id));
    }
    assert_eq!(copy.config.options().unwrap().len(), 4);
    assert_eq!(order(&store, SEED_SECTION_ID)[1], new_id);
}

#[test]
fn test_insert_field_spans_sections() {
    let (store, s1) = empty_store();
    store.add_section(Section::new("s2", "Two"));
    for id in ["a", "b"] {
        store.add_field(&s1, FormField::new(id, default_config(FieldKind::Date)));
    }
    store.add_field("s2", FormField::new("c", default_config(FieldKind::Date)));
    let template = FormField::new("t", default_config(FieldKind::Time));

    let at_three = store.insert_field(3, &template);
    let past_end = store.insert_field(100, &template);

    let s2 = order(&store, "s2");
    assert_eq!(s2[1], at_three.created_id().unwrap());
    assert_eq!(s2[2], past_end.created_id().unwrap());
    assert_eq!(flat_field_order(&store.snapshot()).len(), 5);
}

#[test]
fn test_insert_without_sections_only_stores() {
    let store = FormStore::with_document(
        FormDocument::new("d", FormHeader::new("T")),
        StoreConfig::default(),
    );
    let template = FormField::new("t", default_config(FieldKind::Time));
    let outcome = store.insert_field(0, &template);
    let id = outcome.created_id().unwrap();
    assert!(store.get_field(id).is_some());
}

#[test]
fn test_duplicate_drops_answer() {
    let store = seeded_store();
    store.set_answer("3", FormAnswer::choice("1"));

    let copy_id = store.duplicate_field("3").created_id().unwrap().to_string();
    assert!(store.get_field(&copy_id).unwrap().answer.is_none());
    assert!(store.get_field("3").unwrap().answer.is_some());
}

#[test]
fn test_config_patch_keeps_single_other() {
    let store = seeded_store();
    let before = store.snapshot();
    let version = store.version();

    let two_others = FieldConfig::Checkbox(ChoiceConfig {
        options: vec![
            UserInputOption::other("a", "Other"),
            UserInputOption::other("b", "Something else"),
        ],
        shuffle: false,
    });
    let outcome = store.update_field("3", FieldPatch::new().config(two_others).title("Pick"));
    assert_eq!(outcome, Mutation::Skipped(SkipReason::DuplicateOther("3".into())));
    assert!(Arc::ptr_eq(&store.snapshot(), &before));
    assert_eq!(store.version(), version);

    let one_other = FieldConfig::MultipleChoice(ChoiceConfig {
        options: vec![
            UserInputOption::new("a", "Yes"),
            UserInputOption::other("b", "Other"),
        ],
        shuffle: true,
    });
    assert!(store.update_field("3", FieldPatch::new().config(one_other)).is_applied());
    assert!(check_integrity(&store.snapshot()).is_empty());
}

#[test]
fn test_duplicate_lands_after_original() {
    let store = seeded_store();
    let outcome = store.duplicate_field("4");
    let copy_id = outcome.created_id().unwrap();

    let order = order(&store, SEED_SECTION_ID);
    let at = order.iter().position(|id| id == "4").unwrap();
    assert_eq!(order[at + 1], copy_id);
    assert_eq!(store.get_field(copy_id).unwrap().title.as_deref(), Some("Dropdown"));

    assert!(store.duplicate_field("missing").is_skipped());
}

#[test]
fn test_change_type_replaces_config() {
    let store = seeded_store();
    store.set_answer("2", FormAnswer::choice("0"));
    store.change_field_type("2", FieldKind::Rating);

    let field = store.get_field("2").unwrap();
    assert!(matches!(field.config, FieldConfig::Rating(_)));
    assert!(field.answer.is_none());
    assert_eq!(field.title.as_deref(), Some("Multiple Choice"));
}

#[test]
fn test_option_ops_on_date_are_noops() {
    let store = seeded_store();
    let before = store.snapshot();
    let version = store.version();

    let outcome = store.add_option("9", NewOption::labeled("Nope"));
    assert_eq!(outcome, Mutation::Skipped(SkipReason::NotOptionBearing("9".into())));
    assert!(store.add_row("9", "Row").is_skipped());
    assert!(store.remove_option("9", "0").is_skipped());

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.version(), version);
}

#[test]
fn test_second_other_rejected() {
    let (store, s) = empty_store();
    let id = store
        .append_new_field(&s, FieldKind::Checkbox)
        .created_id()
        .unwrap()
        .to_string();

    assert!(store.add_option(&id, NewOption::other("Other")).is_applied());
    let again = store.add_option(&id, NewOption::other("Other"));
    assert_eq!(again, Mutation::Skipped(SkipReason::DuplicateOther(id.clone())));

    let options = store.get_field(&id).unwrap().config.options().unwrap().to_vec();
    assert_eq!(options.iter().filter(|o| o.other).count(), 1);
}

#[test]
fn test_option_crud() {
    let store = seeded_store();
    let created = store.add_option("4", NewOption::labeled("Option 4"));
    let option_id = created.created_id().unwrap().to_string();
    assert_eq!(store.get_option("4", &option_id).unwrap().label, "Option 4");

    store.update_option("4", &option_id, OptionPatch::label("Fourth"));
    assert_eq!(store.get_option("4", &option_id).unwrap().label, "Fourth");

    assert!(store
        .update_option("4", "ghost", OptionPatch::label("x"))
        .is_skipped());

    store.remove_option("4", &option_id);
    assert!(store.get_option("4", &option_id).is_none());

    store.set_options("4", vec![UserInputOption::new("x", "Only")]);
    assert_eq!(store.get_field("4").unwrap().config.options().unwrap().len(), 1);
}

#[test]
fn test_grid_crud() {
    let store = seeded_store();
    let row = store.add_row("7", "Option 4");
    let row_id = row.created_id().unwrap().to_string();
    let column = store.add_column("7", "Option 4");
    let column_id = column.created_id().unwrap().to_string();

    store.update_row("7", &row_id, OptionPatch::label("Fourth row"));
    store.update_column("7", &column_id, OptionPatch::label("Fourth column"));
    assert_eq!(store.get_row("7", &row_id).unwrap().label, "Fourth row");
    assert_eq!(store.get_column("7", &column_id).unwrap().label, "Fourth column");

    store.remove_row("7", "0");
    store.remove_column("7", "1");
    let field = store.get_field("7").unwrap();
    let table = field.config.table().unwrap();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.columns.len(), 3);
    assert!(store.remove_row("7", "0").is_skipped());
}

#[test]
fn test_siblings_keep_identity() {
    let store = seeded_store();
    let before = store.snapshot();

    store.update_field("3", FieldPatch::new().title("Changed"));
    let after = store.snapshot();

    assert!(!Arc::ptr_eq(before.field("3").unwrap(), after.field("3").unwrap()));
    for id in ["0", "1", "2", "4", "11"] {
        assert!(Arc::ptr_eq(before.field(id).unwrap(), after.field(id).unwrap()));
    }
    assert!(Arc::ptr_eq(
        before.section(SEED_SECTION_ID).unwrap(),
        after.section(SEED_SECTION_ID).unwrap()
    ));
    assert!(Arc::ptr_eq(before.header_arc(), after.header_arc()));
}

#[test]
fn test_reorder_is_permissive_by_default() {
    let store = seeded_store();
    let outcome = store.reorder_fields(SEED_SECTION_ID, vec!["1".into(), "0".into()]);
    assert!(outcome.is_applied());
    assert_eq!(order(&store, SEED_SECTION_ID), vec!["1", "0"]);
}

#[test]
fn test_strict_reorder_rejects_non_permutation() {
    let store = seeded_store();
    let before = store.snapshot();

    let err = store
        .reorder_fields_strict(SEED_SECTION_ID, vec!["0".into()])
        .unwrap_err();
    assert!(matches!(err, FormsError::InvalidOrder { .. }));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));

    assert!(matches!(
        store.reorder_fields_strict("nope", vec![]),
        Err(FormsError::SectionNotFound(_))
    ));

    let mut reversed = order(&store, SEED_SECTION_ID);
    reversed.reverse();
    assert!(store.reorder_fields_strict(SEED_SECTION_ID, reversed.clone()).is_ok());
    assert_eq!(order(&store, SEED_SECTION_ID), reversed);
}

#[test]
fn test_strict_ordering_config() {
    let config = StoreConfig {
        strict_ordering: true,
        ..StoreConfig::default()
    };
    let store = FormStore::with_document(seed_document(), config);
    let outcome = store.reorder_fields(SEED_SECTION_ID, vec!["0".into(), "0".into()]);
    assert!(matches!(outcome.skip_reason(), Some(SkipReason::InvalidOrder(_))));
}

#[test]
fn test_update_section_order_honours_strict_config() {
    let config = StoreConfig {
        strict_ordering: true,
        ..StoreConfig::default()
    };
    let store = FormStore::with_document(seed_document(), config);
    let before = store.snapshot();

    let patch = SectionPatch {
        title: Some("Renamed".into()),
        field_order: Some(vec!["0".into()]),
    };
    let outcome = store.update_section(SEED_SECTION_ID, patch);
    assert!(matches!(outcome.skip_reason(), Some(SkipReason::InvalidOrder(_))));
    assert!(Arc::ptr_eq(&store.snapshot(), &before));

    let mut reversed = order(&store, SEED_SECTION_ID);
    reversed.reverse();
    let patch = SectionPatch {
        title: Some("Renamed".into()),
        field_order: Some(reversed.clone()),
    };
    assert!(store.update_section(SEED_SECTION_ID, patch).is_applied());
    let section = store.get_section(SEED_SECTION_ID).unwrap();
    assert_eq!(section.title, "Renamed");
    assert_eq!(section.field_order, reversed);
}

#[test]
fn test_update_section_order_is_permissive_by_default() {
    let store = seeded_store();
    let patch = SectionPatch {
        title: None,
        field_order: Some(vec!["0".into()]),
    };
    assert!(store.update_section(SEED_SECTION_ID, patch).is_applied());
    assert_eq!(order(&store, SEED_SECTION_ID), vec!["0"]);
}

#[test]
fn test_move_field() {
    let store = seeded_store();
    store.move_field(SEED_SECTION_ID, 0, 2);
    assert_eq!(order(&store, SEED_SECTION_ID)[..3], ["1", "2", "0"]);

    let outcome = store.move_field(SEED_SECTION_ID, 0, 12);
    assert_eq!(
        outcome,
        Mutation::Skipped(SkipReason::OutOfRange {
            section_id: SEED_SECTION_ID.into(),
            index: 12,
        })
    );
}

#[test]
fn test_section_ops() {
    let store = seeded_store();
    store.update_section(SEED_SECTION_ID, SectionPatch::title("Feedback"));
    assert_eq!(store.get_section(SEED_SECTION_ID).unwrap().title, "Feedback");
    assert!(store.update_section("nope", SectionPatch::title("x")).is_skipped());

    store.remove_section(SEED_SECTION_ID);
    assert!(store.get_section(SEED_SECTION_ID).is_none());
    assert_eq!(store.snapshot().fields().len(), 12);
}

#[test]
fn test_header_ops() {
    let (store, _) = empty_store();
    store.update_header(HeaderPatch {
        title: Some("Survey".into()),
        description: None,
    });
    assert_eq!(store.header().title, "Survey");
    assert_eq!(store.header().description.as_deref(), Some("Form Description"));

    store.set_header(FormHeader::new("Plain"));
    assert!(store.header().description.is_none());
}

#[test]
fn test_answers() {
    let store = seeded_store();
    store.set_answer("0", FormAnswer::text("Ada"));
    assert_eq!(
        store.get_field("0").unwrap().answer.as_ref().and_then(|a| a.as_text()),
        Some("Ada")
    );
    store.clear_answer("0");
    assert!(store.get_field("0").unwrap().answer.is_none());
    assert!(store.set_answer("ghost", FormAnswer::text("x")).is_skipped());
}

#[test]
fn test_try_set_form_keeps_prior_on_failure() {
    let (store, _) = empty_store();
    let before = store.snapshot();
    let broken = FormDocument::new("d", FormHeader::new("T"))
        .with_section(Section::new("s", "S").with_order(["ghost"]));

    assert!(matches!(store.try_set_form(broken), Err(FormsError::Integrity(_))));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));

    assert!(store.try_set_form(seed_document()).is_ok());
    assert_eq!(store.snapshot().id(), "nanogram-feedback-form");
}

#[test]
fn test_reset() {
    let store = seeded_store();
    store.reset();
    let doc = store.snapshot();
    assert!(doc.fields().is_empty());
    assert_eq!(doc.header().title, "Untitled Form");
}

#[test]
fn test_require_field() {
    let store = seeded_store();
    assert!(store.require_field("0").is_ok());
    assert_eq!(
        store.require_field("zz").unwrap_err(),
        FormsError::FieldNotFound("zz".into())
    );
}

#[test]
fn test_subscribers_see_applied_mutations_only() {
    let store = seeded_store();
    let seen = Arc::new(AtomicUsize::new(0));
    let events = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let counter = seen.clone();
    let log = events.clone();
    let sub = store.subscribe(move |event| {
        counter.fetch_add(1, Ordering::SeqCst);
        log.lock().push((event.event.event_type(), event.version));
    });

    store.update_field("0", FieldPatch::new().required(false));
    store.remove_field("ghost");
    store.add_row("7", "Row 4");

    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(
        *events.lock(),
        vec![("field.updated", 1), ("field.table_changed", 2)]
    );

    assert!(store.unsubscribe(sub));
    assert!(!store.unsubscribe(sub));
    store.reset();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_subscriber_can_read_store() {
    let store = Arc::new(seeded_store());
    let titles = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let reader = Arc::downgrade(&store);
    let sink = titles.clone();
    store.subscribe(move |event| {
        if let (Some(store), Some(field_id)) = (reader.upgrade(), event.event.field_id()) {
            if let Some(field) = store.get_field(field_id) {
                sink.lock().push(field.title.clone());
            }
        }
    });

    store.update_field("5", FieldPatch::new().title("Scale"));
    assert_eq!(*titles.lock(), vec![Some("Scale".to_string())]);
}

#[test]
fn test_concurrent_writers() {
    let store = Arc::new(FormStore::default());
    let section_id = store.snapshot().sections().keys().next().unwrap().clone();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let section_id = section_id.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    store.append_new_field(&section_id, FieldKind::Checkbox);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.version(), 100);
    let doc = store.snapshot();
    assert_eq!(doc.fields().len(), 100);
    assert!(check_integrity(&doc).is_empty());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Append(usize, usize),
        Insert(usize, usize),
        Duplicate(usize),
        Remove(usize),
        ChangeType(usize, usize),
        AddOption(usize, bool),
        RemoveOption(usize, usize),
        AddRow(usize),
        Move(usize, usize),
        Reverse,
        AddSection,
        RemoveSection(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..12usize, 0..4usize).prop_map(|(k, s)| Op::Append(k, s)),
            (0..40usize, 0..40usize).prop_map(|(i, f)| Op::Insert(i, f)),
            (0..40usize).prop_map(Op::Duplicate),
            (0..40usize).prop_map(Op::Remove),
            (0..40usize, 0..12usize).prop_map(|(f, k)| Op::ChangeType(f, k)),
            (0..40usize, any::<bool>()).prop_map(|(f, o)| Op::AddOption(f, o)),
            (0..40usize, 0..8usize).prop_map(|(f, o)| Op::RemoveOption(f, o)),
            (0..40usize).prop_map(Op::AddRow),
            (0..20usize, 0..20usize).prop_map(|(a, b)| Op::Move(a, b)),
            Just(Op::Reverse),
            Just(Op::AddSection),
            (0..4usize).prop_map(Op::RemoveSection),
        ]
    }

    fn nth_key<V>(map: &indexmap::IndexMap<String, V>, n: usize) -> Option<String> {
        if map.is_empty() {
            None
        } else {
            map.get_index(n % map.len()).map(|(k, _)| k.clone())
        }
    }

    fn run(store: &FormStore, op: Op) {
        let doc = store.snapshot();
        let field = |n| nth_key(doc.fields(), n);
        let section = |n| nth_key(doc.sections(), n);
        match op {
            Op::Append(kind, s) => {
                if let Some(s) = section(s) {
                    store.append_new_field(&s, FieldKind::ALL[kind]);
                }
            }
            Op::Insert(index, f) => {
                if let Some(f) = field(f) {
                    let template = doc.field(&f).unwrap().clone();
                    store.insert_field(index, &template);
                }
            }
            Op::Duplicate(f) => {
                if let Some(f) = field(f) {
                    store.duplicate_field(&f);
                }
            }
            Op::Remove(f) => {
                if let Some(f) = field(f) {
                    store.remove_field(&f);
                }
            }
            Op::ChangeType(f, kind) => {
                if let Some(f) = field(f) {
                    store.change_field_type(&f, FieldKind::ALL[kind]);
                }
            }
            Op::AddOption(f, other) => {
                if let Some(f) = field(f) {
                    let option = if other {
                        NewOption::other("Other")
                    } else {
                        NewOption::labeled("Option")
                    };
                    store.add_option(&f, option);
                }
            }
            Op::RemoveOption(f, n) => {
                if let Some(f) = field(f) {
                    let ids: Vec<String> = doc.field(&f).unwrap().config.nested_ids()
                        .into_iter()
                        .map(String::from)
                        .collect();
                    if let Some(id) = ids.get(n) {
                        store.remove_option(&f, id);
                    }
                }
            }
            Op::AddRow(f) => {
                if let Some(f) = field(f) {
                    store.add_row(&f, "Row");
                }
            }
            Op::Move(from, to) => {
                if let Some(s) = section(0) {
                    store.move_field(&s, from, to);
                }
            }
            Op::Reverse => {
                if let Some(s) = section(0) {
                    let mut order = doc.section(&s).unwrap().field_order.clone();
                    order.reverse();
                    store.reorder_fields(&s, order);
                }
            }
            Op::AddSection => {
                let id = store.id_generator().generate();
                store.add_section(Section::new(id, "Extra"));
            }
            Op::RemoveSection(s) => {
                if doc.sections().len() > 1 {
                    if let Some(s) = section(s) {
                        store.remove_section(&s);
                    }
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_mutations_preserve_integrity(ops in prop::collection::vec(op(), 1..40)) {
            let store = seeded_store();
            for op in ops {
                run(&store, op);
                let doc = store.snapshot();
                let issues = check_integrity(&doc);
                prop_assert!(issues.is_empty(), "{:?}", issues);
            }
        }

        #[test]
        fn prop_skips_leave_snapshot_untouched(field in "[a-z]{3,6}", option in "[a-z]{3,6}") {
            let store = seeded_store();
            let before = store.snapshot();
            let missing = format!("missing-{}", field);
            store.update_field(&missing, FieldPatch::new().title("x"));
            store.remove_field(&missing);
            store.remove_option("2", &option);
            store.update_row("8", &option, OptionPatch::label("x"));
            prop_assert!(Arc::ptr_eq(&before, &store.snapshot()));
            prop_assert_eq!(store.version(), 0);
        }
    }
}
