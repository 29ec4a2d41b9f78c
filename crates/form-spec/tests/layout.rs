use form_spec::{Config, Element, Field, FormElement, GRID_COLUMNS, Language, split_group};

fn fields(field_cols: &[u32]) -> Vec<Element> {
    field_cols
        .iter()
        .enumerate()
        .map(|(idx, cols)| Element::new("text", format!("f{idx}")).with_cols(0, *cols))
        .collect()
}

#[test]
fn grid_budget_splits_into_three_rows() {
    let elements = fields(&[4, 4, 8, 4, 4]);
    let groups = split_group(&elements);
    assert_eq!(groups.len(), 3);
    let sizes = groups.iter().map(|g| g.len()).collect::<Vec<_>>();
    assert_eq!(sizes, vec![2, 1, 2]);
    assert!(groups.iter().all(|g| g.cols() <= GRID_COLUMNS));
}

#[test]
fn langset_forces_its_own_row() {
    let mut elements = fields(&[4, 4, 8, 4, 4]);
    elements.insert(3, Element::langset("i18n"));
    let groups = split_group(&elements);
    assert_eq!(groups.len(), 4);
    assert_eq!(groups[2].elements[0].name, "i18n");
    assert_eq!(groups[2].len(), 1);
}

#[test]
fn leading_set_does_not_open_an_empty_row() {
    let mut elements = vec![Element::fieldset("first")];
    elements.extend(fields(&[4]));
    let groups = split_group(&elements);
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| !g.is_empty()));
}

#[test]
fn language_groups_cover_indexed_fields() {
    let mut lang = Language::new("en", "English", "~");
    for name in ["a", "b", "c"] {
        lang.add_field(FormElement::Field(Field::new("text", name).with_cols(2, 4)));
    }
    let groups = lang.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn name_qualification() {
    let indexed = Language::new("en", "English", "~");
    assert_eq!(indexed.name("title"), "Language[en][title]");
    let identity = Language::new("en", "English", "");
    assert_eq!(identity.name("title"), "title");
}

#[test]
fn fixture_top_level_rows() {
    let config = Config::from_json_str(include_str!("../tests/fixtures/contact_form.json"))
        .expect("fixture parses");
    let groups = split_group(&config.elements);
    let rows = groups
        .iter()
        .map(|g| {
            g.elements
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            vec!["email", "topic"],
            vec!["notice"],
            vec!["details"],
            vec!["i18n"],
        ]
    );
}
