use form_spec::{Config, ElementKind, FormElement};
use forms::{FieldDescriptor, FieldKind, FormBuilder, FormModel, form_from_model};

fn fixture(name: &str) -> &'static str {
    match name {
        "signup" => include_str!("fixtures/signup.json"),
        "signup_overlay" => include_str!("fixtures/signup_overlay.json"),
        other => panic!("unknown fixture {other}"),
    }
}

fn signup() -> Config {
    Config::from_json_str(fixture("signup")).expect("signup fixture parses")
}

#[test]
fn trim_prefix_applies_to_nested_names() {
    let form = FormBuilder::new().build(&signup());

    assert!(form.field("name").is_some());
    assert!(form.field("User.name").is_none());
    let city = form.field("city").expect("fieldset child");
    assert_eq!(city.label, "City");
}

#[test]
fn attributes_and_rules_reach_the_field() {
    let form = FormBuilder::new().build(&signup());

    let name = form.field("name").expect("name field");
    assert_eq!(
        name.params.get("placeholder").map(String::as_str),
        Some("Full name")
    );
    assert!(name.tags.contains("required"));

    let email = form.field("email").expect("email field");
    assert_eq!(email.data.get("valid"), Some(&serde_json::json!("required;email")));
}

#[test]
fn theme_override_wins_over_config() {
    let form = FormBuilder::new().with_theme("base").build(&signup());
    assert_eq!(form.theme, "base");

    let plain = FormBuilder::new().build(&signup());
    assert_eq!(plain.theme, "bootstrap3");
}

#[test]
fn document_languages_index_qualified_copies() {
    let form = FormBuilder::new().build(&signup());
    let english = form.language("en").expect("english");

    assert!(english.has_name("Language[en][name]"));
    let copy = english.field("name").expect("indexed copy");
    assert_eq!(copy.name(), "Language[en][name]");
    assert_eq!(copy.language(), "en");

    let city = english.field("city").expect("nested copy");
    assert_eq!(city.name(), "Language[en][city]");

    // The unqualified tree is left alone.
    assert_eq!(form.field("name").map(|f| f.name.as_str()), Some("name"));
}

#[test]
fn langset_children_are_copied_per_language() {
    let form = FormBuilder::new().build(&signup());
    let Some(FormElement::LangSet(bio)) = form.element("bio") else {
        panic!("bio should be a langset");
    };

    assert_eq!(bio.languages().len(), 2);
    assert_eq!(bio.elements().len(), 1);
    let fr = bio.language("fr").expect("french");
    let about = fr.field("about").expect("french copy");
    assert_eq!(about.name(), "bio[fr][about]");
    assert_eq!(about.language(), "fr");
    assert!(bio.groups("de").is_none());
}

#[test]
fn bound_values_reach_every_language_copy() {
    let mut config = signup();
    config.set_value(|name| format!("v:{name}"));
    let form = FormBuilder::new().build(&config);

    let Some(FormElement::LangSet(bio)) = form.element("bio") else {
        panic!("bio should be a langset");
    };
    for (lang, expected) in [("en", "v:bio[en][User.about]"), ("fr", "v:bio[fr][User.about]")] {
        let about = bio
            .language(lang)
            .and_then(|language| language.field("about"))
            .and_then(FormElement::as_field)
            .expect("language copy");
        assert_eq!(about.value, expected);
        assert_eq!(about.text.as_deref(), Some(expected));
    }

    let english = form.language("en").expect("english");
    let name = english
        .field("name")
        .and_then(FormElement::as_field)
        .expect("indexed copy");
    assert_eq!(name.value, "v:Language[en][User.name]");
    let city = english
        .field("city")
        .and_then(FormElement::as_field)
        .expect("nested copy");
    assert_eq!(city.value, "v:Language[en][User.city]");

    // Language-scoped values never land on the unqualified field.
    assert_eq!(form.field("name").map(|f| f.value.as_str()), Some(""));
}

#[test]
fn groups_follow_grid_and_sets() {
    let form = FormBuilder::new().build(&signup());
    let groups = form.groups();

    let rows: Vec<Vec<&str>> = groups
        .iter()
        .map(|group| group.elements.iter().map(|e| e.name()).collect())
        .collect();
    assert_eq!(rows, vec![vec!["name", "email"], vec!["address"], vec!["bio"]]);
    assert_eq!(groups[0].cols(), 12);
    assert_eq!(groups[1].elements[0].kind(), ElementKind::FieldSet);
}

#[test]
fn add_error_marks_the_group() {
    let mut form = FormBuilder::new().build(&signup());
    assert!(form.add_error("email", "invalid address"));
    assert!(!form.add_error("missing", "nope"));

    let groups = form.groups();
    assert!(groups[0].has_error);
    assert!(!groups[1].has_error);
    assert_eq!(
        form.field("email").map(|f| f.errors.clone()),
        Some(vec!["invalid address".to_string()])
    );
}

#[test]
fn sorting_reorders_top_level() {
    let mut form = FormBuilder::new().build(&signup());
    form.sort("bio:0,name:last");
    let order: Vec<&str> = form.elements().iter().map(FormElement::name).collect();
    assert_eq!(order, vec!["bio", "email", "address", "name"]);

    form.sort_to_last(&["bio"]);
    let order: Vec<&str> = form.elements().iter().map(FormElement::name).collect();
    assert_eq!(order.last(), Some(&"bio"));
}

#[test]
fn merged_overlay_builds_with_extra_fields() {
    let mut config = signup();
    let overlay = Config::from_json_str(fixture("signup_overlay")).expect("overlay parses");
    config.merge(&overlay);

    let form = FormBuilder::new().build(&config);
    assert_eq!(form.id, "signup");
    assert_eq!(form.theme, "bootstrap3");
    assert_eq!(form.template, "allfields");
    assert_eq!(form.buttons, vec!["submit", "reset"]);
    assert_eq!(form.field("name").map(|f| f.label_cols), Some(3));
    assert_eq!(form.field("name").map(|f| f.label.as_str()), Some("Name"));
    assert!(form.field("terms").is_some());
}

struct Profile {
    nickname: String,
    age: u32,
    city: String,
}

impl FormModel for Profile {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("nickname", FieldKind::Text).valid("required"),
            FieldDescriptor::new("age", FieldKind::Int).sort("0"),
            FieldDescriptor::new("password", FieldKind::Text).skip(),
            FieldDescriptor::new("address.city", FieldKind::Text).fieldset("address"),
            FieldDescriptor::new("address.street", FieldKind::Text)
                .fieldset("address")
                .sort("0"),
            FieldDescriptor::new("subscribed", FieldKind::Bool).label("Newsletter"),
        ]
    }

    fn value(&self, name: &str) -> Option<String> {
        match name {
            "nickname" => Some(self.nickname.clone()),
            "age" => Some(self.age.to_string()),
            "address.city" => Some(self.city.clone()),
            _ => None,
        }
    }
}

#[test]
fn model_form_applies_sort_hints_and_values() {
    let profile = Profile {
        nickname: "kit".into(),
        age: 31,
        city: "Lyon".into(),
    };
    let form = form_from_model(&profile, &FormBuilder::new());

    let order: Vec<&str> = form.elements().iter().map(FormElement::name).collect();
    assert_eq!(order, vec!["age", "nickname", "subscribed", "address"]);

    let Some(FormElement::FieldSet(address)) = form.element("address") else {
        panic!("address should be a fieldset");
    };
    let members: Vec<&str> = address.elements().iter().map(FormElement::name).collect();
    assert_eq!(members, vec!["address.street", "address.city"]);

    assert_eq!(form.field("age").map(|f| f.kind.as_str()), Some("number"));
    assert_eq!(form.field("age").map(|f| f.value.as_str()), Some("31"));
    assert_eq!(form.field("address.city").map(|f| f.value.as_str()), Some("Lyon"));
    assert_eq!(
        form.field("subscribed").map(|f| (f.kind.as_str(), f.label.as_str())),
        Some(("checkbox", "Newsletter"))
    );
    assert!(form.field("password").is_none());
    assert!(form.with_buttons);
    assert_eq!(form.buttons, vec!["submit", "reset"]);
}
