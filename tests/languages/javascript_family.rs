//! JavaScript family: TypeScript, TSX, JavaScript, JSX
//!
//! All four grammars share the node categories used for entity recognition,
//! so the same constructs must be found in each.

use semdiff::{extract, EntityKind, EntityMap, Lang};

fn extract_as(lang: Lang, source: &str) -> EntityMap {
    extract(source, &lang.tree_sitter_language())
        .unwrap_or_else(|e| panic!("{} extraction failed: {}", lang.name(), e))
}

fn names(map: &EntityMap) -> Vec<String> {
    map.names().cloned().collect()
}

#[test]
fn test_common_constructs_in_every_grammar() {
    let source = r#"
function load(path) {
  return read(path);
}

class Store {
  constructor() {
    this.items = [];
  }
  add(item) {
    this.items.push(item);
  }
}

const save = async (item) => {
  await write(item);
};
"#;
    for lang in Lang::ALL {
        let map = extract_as(lang, source);
        assert_eq!(
            names(&map),
            vec!["Store", "add", "constructor", "load", "save"],
            "{}",
            lang.name()
        );
        assert_eq!(map.get("save").unwrap().kind, EntityKind::ArrowFunction);
        assert_eq!(map.get("constructor").unwrap().kind, EntityKind::Method);
    }
}

#[test]
fn test_typescript_specific_syntax() {
    let source = r#"
interface Shape {
  area(): number;
}

export abstract class Base {}

export class Circle implements Shape {
  constructor(private r: number) {}
  area(): number {
    return Math.PI * this.r ** 2;
  }
}

export const scale = <T extends Shape>(s: T, k: number): number => s.area() * k;

export default function main(): void {}
"#;
    let map = extract_as(Lang::TypeScript, source);
    let found = names(&map);
    for expected in ["Circle", "area", "constructor", "scale"] {
        assert!(found.contains(&expected.to_string()), "missing {}: {:?}", expected, found);
    }
    // Interface members are signatures, not definitions
    assert_eq!(map.get("area").unwrap().start_line, 10);
}

#[test]
fn test_jsx_components() {
    let source = r#"
export function Header({ title }) {
  return <h1>{title}</h1>;
}

export const Footer = () => <footer>bye</footer>;

class Page extends React.Component {
  render() {
    return <div><Header title="x" /><Footer /></div>;
  }
}
"#;
    for lang in [Lang::Jsx, Lang::Tsx] {
        let map = extract_as(lang, source);
        assert_eq!(
            names(&map),
            vec!["Footer", "Header", "Page", "render"],
            "{}",
            lang.name()
        );
    }
}

#[test]
fn test_getters_setters_and_static_methods() {
    let source = r#"
class Temperature {
  static fromF(f) { return new Temperature((f - 32) / 1.8); }
  get celsius() { return this.c; }
  set celsius(v) { this.c = v; }
}
"#;
    let map = extract_as(Lang::JavaScript, source);
    assert_eq!(names(&map), vec!["Temperature", "celsius", "fromF"]);
    // The setter comes after the getter and wins
    assert!(map.get("celsius").unwrap().text.starts_with("set celsius"));
    assert_eq!(map.shadowed(), ["celsius".to_string()]);
}

#[test]
fn test_line_spans_are_one_based_and_inclusive() {
    let source = "\n\nfunction f() {\n  return 1;\n}\n";
    let map = extract_as(Lang::JavaScript, source);
    let f = map.get("f").unwrap();
    assert_eq!((f.start_line, f.end_line), (3, 5));
}
