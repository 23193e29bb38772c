use spriteborder::error::SpriteError;
use spriteborder::filter::{
    base_name, filter_paths, select, FilterDiagnostic, FilterKind, FilterMode, FilterSettings,
};
use std::fs;
use std::path::PathBuf;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from("Assets/UI").join(n)).collect()
}

fn names(mode: FilterMode, input: &[&str]) -> Vec<String> {
    filter_paths(&paths(input), &mode).base_names()
}

const SAMPLE: [&str; 3] = ["a_1.png", "a_2.png", "b_1.png"];

#[test]
fn no_filter_keeps_every_path_in_order() {
    let input = paths(&["z.png", "a.png", "m.png"]);
    let selection = filter_paths(&input, &FilterMode::None);
    assert_eq!(selection.matched, input);
    assert!(selection.diagnostics.is_empty());
}

#[test]
fn prefix_selects_matching_names() {
    assert_eq!(names(FilterMode::Prefix("a_".into()), &SAMPLE), ["a_1", "a_2"]);
}

#[test]
fn postfix_selects_matching_names() {
    assert_eq!(names(FilterMode::Postfix("_2".into()), &SAMPLE), ["a_2"]);
}

#[test]
fn regex_selects_matching_names() {
    assert_eq!(names(FilterMode::Regex("^b_".into()), &SAMPLE), ["b_1"]);
}

#[test]
fn malformed_regex_excludes_everything_with_a_diagnostic() {
    let selection = filter_paths(&paths(&SAMPLE), &FilterMode::Regex("[".into()));
    assert!(selection.is_empty());
    assert_eq!(selection.diagnostics.len(), 1);
    match &selection.diagnostics[0] {
        FilterDiagnostic::InvalidPattern { pattern, reason } => {
            assert_eq!(pattern, "[");
            assert!(!reason.is_empty());
        }
    }
}

#[test]
fn prefix_and_postfix_ignore_case() {
    let input = ["Button_Hover.png", "button_idle.png", "PANEL_hover.png"];
    assert_eq!(
        names(FilterMode::Prefix("BUTTON".into()), &input),
        ["Button_Hover", "button_idle"]
    );
    assert_eq!(
        names(FilterMode::Postfix("_HOVER".into()), &input),
        ["Button_Hover", "PANEL_hover"]
    );
}

#[test]
fn regex_is_an_unanchored_case_sensitive_search() {
    let input = ["icon_Big.png", "icon_big.png", "big_icon.png"];
    assert_eq!(
        names(FilterMode::Regex("Big".into()), &input),
        ["icon_Big"]
    );
    assert_eq!(
        names(FilterMode::Regex("(?i)big".into()), &input),
        ["icon_Big", "icon_big", "big_icon"]
    );
}

#[test]
fn empty_texts_match_everything() {
    for mode in [
        FilterMode::Prefix(String::new()),
        FilterMode::Postfix(String::new()),
        FilterMode::Regex(String::new()),
    ] {
        let selection = filter_paths(&paths(&SAMPLE), &mode);
        assert_eq!(selection.len(), 3, "{}", mode);
        assert!(selection.diagnostics.is_empty());
    }
}

#[test]
fn filters_match_the_base_name_not_the_directory_or_extension() {
    let input = vec![
        PathBuf::from("Assets/a_dir/b_1.png"),
        PathBuf::from("Assets/a_dir/a.b.png"),
    ];
    let selection = filter_paths(&input, &FilterMode::Prefix("a".into()));
    assert_eq!(selection.base_names(), ["a.b"]);

    let selection = filter_paths(&input, &FilterMode::Regex("png".into()));
    assert!(selection.is_empty());
    assert_eq!(base_name(&input[1]), "a.b");
}

#[test]
fn filtering_is_idempotent() {
    let input = paths(&["x_1.png", "y_1.png", "x_2.png"]);
    let mode = FilterMode::Postfix("_1".into());
    let first = filter_paths(&input, &mode);
    let second = filter_paths(&input, &mode);
    assert_eq!(first.matched, second.matched);
}

#[test]
fn activating_one_filter_deactivates_the_others() {
    let mut settings = FilterSettings {
        prefix: "a_".into(),
        postfix: "_2".into(),
        regex: "^b".into(),
        active: FilterKind::None,
    };

    let toggles = [
        FilterKind::Prefix,
        FilterKind::Regex,
        FilterKind::Postfix,
        FilterKind::Postfix,
        FilterKind::Prefix,
        FilterKind::Regex,
        FilterKind::Regex,
    ];
    for kind in toggles {
        settings.toggle(kind);
        let active = [FilterKind::Prefix, FilterKind::Postfix, FilterKind::Regex]
            .iter()
            .filter(|k| settings.is_active(**k))
            .count();
        assert!(active <= 1);
    }

    settings.activate(FilterKind::Prefix);
    assert_eq!(settings.mode(), FilterMode::Prefix("a_".into()));
    settings.activate(FilterKind::Regex);
    assert!(!settings.is_active(FilterKind::Prefix));
    assert_eq!(settings.mode(), FilterMode::Regex("^b".into()));
    settings.toggle(FilterKind::Regex);
    assert_eq!(settings.mode(), FilterMode::None);
}

#[test]
fn applying_a_mode_keeps_the_other_texts() {
    let mut settings = FilterSettings::default();
    settings.apply(FilterMode::Prefix("btn_".into()));
    settings.apply(FilterMode::Postfix("_9".into()));

    assert_eq!(settings.prefix, "btn_");
    assert_eq!(settings.active, FilterKind::Postfix);
    assert_eq!(settings.mode(), FilterMode::Postfix("_9".into()));
}

#[test]
fn select_scans_recursively_for_the_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::write(root.join("a_1.png"), b"").unwrap();
    fs::write(root.join("nested/a_2.PNG"), b"").unwrap();
    fs::write(root.join("nested/deeper/b_1.png"), b"").unwrap();
    fs::write(root.join("a_3.png.meta"), b"").unwrap();
    fs::write(root.join("a_4.jpg"), b"").unwrap();
    fs::create_dir_all(root.join("a_5.png")).unwrap();

    let all = select(root, "png", &FilterMode::None).unwrap();
    let mut found = all.base_names();
    found.sort();
    assert_eq!(found, ["a_1", "a_2", "b_1"]);

    let prefixed = select(root, ".png", &FilterMode::Prefix("A_".into())).unwrap();
    let mut found = prefixed.base_names();
    found.sort();
    assert_eq!(found, ["a_1", "a_2"]);

    let again = select(root, "png", &FilterMode::Prefix("A_".into())).unwrap();
    assert_eq!(prefixed.matched, again.matched);
}

#[test]
fn select_with_no_matches_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a_1.png"), b"").unwrap();

    let selection = select(tmp.path(), "png", &FilterMode::Prefix("zzz".into())).unwrap();
    assert!(selection.is_empty());
}

#[test]
fn select_fails_when_root_is_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    match select(&missing, "png", &FilterMode::None) {
        Err(SpriteError::Scan { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected scan failure, got {:?}", other.map(|s| s.matched)),
    }
}
