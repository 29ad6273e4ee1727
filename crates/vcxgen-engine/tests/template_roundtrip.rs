use pretty_assertions::assert_eq;
use vcxgen_engine::{
    Child, DEFAULT_NAMESPACE, EncodeOptions, ExtensionMap, FilterOptions, Node, build_filters,
    decode, encode, encode_with, filters::declared_path, local_name_is, parse_namespace,
    render_filters, render_project, rewrite_template, scan,
};

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn filter_options() -> FilterOptions {
    FilterOptions::new(parse_namespace(DEFAULT_NAMESPACE).unwrap(), ".").with_separator('/')
}

/// Collect (label, item includes) for every ItemGroup in document order.
fn item_groups(root: &mut Node) -> Vec<(Option<String>, Vec<String>)> {
    let mut groups = Vec::new();
    scan(root, &local_name_is("ItemGroup"), &mut |group: &mut Node| {
        let includes = group
            .elements()
            .filter_map(|item| item.attribute("Include"))
            .map(str::to_string)
            .collect();
        groups.push((group.attribute("Label").map(str::to_string), includes));
    });
    groups
}

#[test]
fn template_survives_decode_encode_cycles() {
    let root = decode(&fixture("template.vcxproj")).unwrap();
    let once = encode(&root).unwrap();
    let twice = encode(&decode(&once).unwrap()).unwrap();

    assert_eq!(String::from_utf8(once).unwrap(), String::from_utf8(twice).unwrap());
}

#[test]
fn template_keeps_comments_and_structure() {
    let root = decode(&fixture("template.vcxproj")).unwrap();

    assert_eq!(root.local_name(), "Project");
    assert_eq!(
        root.attribute("xmlns"),
        Some("http://schemas.microsoft.com/developer/msbuild/2003")
    );
    assert!(
        root.children()
            .iter()
            .any(|child| matches!(child, Child::Comment(c) if c.contains("generated item groups")))
    );
    let names: Vec<_> = root.elements().map(Node::local_name).collect();
    assert_eq!(
        names,
        vec![
            "ItemGroup",
            "PropertyGroup",
            "ItemGroup",
            "ItemGroup",
            "ItemDefinitionGroup",
            "Import"
        ]
    );
}

#[test]
fn mixed_content_order_is_preserved() {
    let encoded = encode(&decode(b"<R>a<X/>b</R>").unwrap()).unwrap();
    assert_eq!(String::from_utf8(encoded).unwrap(), "<R>a<X/>b</R>");
}

#[test]
fn built_tree_round_trips() {
    let mut root = Node::with_namespace("Project", "urn:test");
    root.add_attribute("b", "1");
    root.add_attribute("a", "2 & 3");
    root.add_attribute("a", "dup");
    let group = root.add_child("Group");
    group.add_text("lead <text>");
    group.add_child("Item").add_attribute("Include", "x.cpp");
    group.add_comment(" trailing ");

    let once = encode(&root).unwrap();
    let twice = encode(&decode(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn rewriting_fills_only_labelled_groups() {
    let mut root = decode(&fixture("template.vcxproj")).unwrap();
    let files = ["src/main.cpp", "include/app.h", "src/util.cxx", "README.txt"];

    let rewritten = rewrite_template(&mut root, &files, &ExtensionMap::default());
    assert_eq!(rewritten, 2);

    assert_eq!(
        item_groups(&mut root),
        vec![
            (
                Some("ProjectConfigurations".to_string()),
                vec!["Debug|x64".to_string(), "Release|x64".to_string()]
            ),
            (None, vec!["include/app.h".to_string()]),
            (
                None,
                vec!["src/main.cpp".to_string(), "src/util.cxx".to_string()]
            ),
        ]
    );
}

#[test]
fn rewritten_project_drops_placeholders() {
    let bytes = render_project(
        &fixture("template.vcxproj"),
        &["src/main.cpp"],
        &ExtensionMap::default(),
    )
    .unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(!text.contains("placeholder"));
    assert!(!text.contains("Label=\"Sources\""));
    assert!(text.contains("Label=\"Globals\""));
    assert!(text.contains("<!-- generated item groups follow -->"));
    assert!(text.contains("%(PreprocessorDefinitions)"));
}

#[test]
fn filter_document_reads_back() {
    let files = ["src/a.cpp", "src/b.cpp", "inc/a.h"];
    let bytes = render_filters(&files, &filter_options(), &ExtensionMap::default()).unwrap();
    let root = decode(&bytes).unwrap();

    let groups: Vec<_> = root.elements().collect();
    assert_eq!(groups.len(), 2);

    let mut declared: Vec<_> = groups[0].elements().filter_map(declared_path).collect();
    declared.sort();
    assert_eq!(
        declared,
        vec![
            "Header Files",
            "Header Files/inc",
            "Source Files",
            "Source Files/src"
        ]
    );
    assert_eq!(groups[1].elements().count(), 3);
}

#[test]
fn filter_identifiers_are_stable_between_runs() {
    let files = ["src/a.cpp", "inc/a.h"];
    let first = build_filters(&files, &filter_options(), &ExtensionMap::default());
    let second = build_filters(&files, &filter_options(), &ExtensionMap::default());

    assert_eq!(
        encode_with(&first, &EncodeOptions::indented(2)).unwrap(),
        encode_with(&second, &EncodeOptions::indented(2)).unwrap()
    );
}
