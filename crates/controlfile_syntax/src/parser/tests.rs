//! Parser unit tests.
//!
//! Each test parses against a small fixed registry: an agenda-bodied `Arts`
//! entry point, a nested agenda method, a generic `Copy`, and ordinary methods
//! covering every keyword value kind.

use controlfile_core::{
    FormalGroup, Group, KeywordDescriptor, MethodDescriptor, MethodRegistry, Value, ValueKind, VariableRegistry,
    specialized_name,
};

use super::*;
use crate::include::InMemoryResolver;

struct Fixture {
    methods: MethodRegistry,
    variables: VariableRegistry,
}

fn fixed(name: &str) -> FormalGroup {
    FormalGroup::Fixed(Group::new(name))
}

fn fixture() -> Fixture {
    let mut methods = MethodRegistry::new();
    methods.insert(MethodDescriptor::new("Arts").with_agenda_body()).unwrap();
    methods.insert(MethodDescriptor::new("Loop").with_agenda_body()).unwrap();
    methods.insert(MethodDescriptor::new("Main").with_agenda_body()).unwrap();

    let copy = methods
        .insert(
            MethodDescriptor::new("Copy")
                .with_output(FormalGroup::Polymorphic)
                .with_input(FormalGroup::Polymorphic),
        )
        .unwrap();
    for group in ["Vector", "Matrix"] {
        let group = Group::new(group);
        methods
            .insert_specialization(
                copy,
                group.clone(),
                MethodDescriptor::new(specialized_name("Copy", &group))
                    .with_output(FormalGroup::Fixed(group.clone()))
                    .with_input(FormalGroup::Fixed(group.clone())),
            )
            .unwrap();
    }

    methods
        .insert(
            MethodDescriptor::new("f")
                .with_keyword(KeywordDescriptor::required("x", ValueKind::Integer))
                .with_keyword(KeywordDescriptor::with_default("y", ValueKind::String, "\"dflt\"")),
        )
        .unwrap();
    methods
        .insert(
            MethodDescriptor::new("Set")
                .with_output(fixed("Vector"))
                .with_keyword(KeywordDescriptor::required("value", ValueKind::FloatList)),
        )
        .unwrap();
    methods
        .insert(
            MethodDescriptor::new("Grid")
                .with_keyword(KeywordDescriptor::with_default("n", ValueKind::Integer, "10"))
                .with_keyword(KeywordDescriptor::with_default("names", ValueKind::StringList, "[]")),
        )
        .unwrap();
    methods
        .insert(
            MethodDescriptor::new("Broken")
                .with_keyword(KeywordDescriptor::with_default("n", ValueKind::Integer, "ten")),
        )
        .unwrap();
    methods
        .insert(
            MethodDescriptor::new("Scale")
                .with_output(fixed("Vector"))
                .with_input(fixed("Vector"))
                .with_input(fixed("Numeric"))
                .with_keyword(KeywordDescriptor::with_default("factor", ValueKind::Float, "1.0"))
                .with_keyword(KeywordDescriptor::with_default("ids", ValueKind::IntegerList, "[ 1, 2 ]")),
        )
        .unwrap();

    let mut variables = VariableRegistry::new();
    variables.insert("a", Group::new("Vector")).unwrap();
    variables.insert("b", Group::new("Vector")).unwrap();
    variables.insert("m", Group::new("Matrix")).unwrap();
    variables.insert("s", Group::new("Numeric")).unwrap();

    Fixture { methods, variables }
}

impl Fixture {
    fn parse_with(&self, source: &str, resolver: &InMemoryResolver, config: ParserConfig) -> Result<Agenda, CompileError> {
        Parser::new(&self.methods, &self.variables, resolver, config).parse_main("main.arts", source)
    }

    fn parse(&self, source: &str) -> Result<Agenda, CompileError> {
        self.parse_with(source, &InMemoryResolver::new(), ParserConfig::default())
    }

    fn name(&self, statement: &Statement) -> &str {
        &self.methods.get(statement.method).name
    }

    fn var(&self, name: &str) -> controlfile_core::VarId {
        self.variables.lookup(name).unwrap().0
    }
}

fn kind_of(result: Result<Agenda, CompileError>) -> ErrorKind {
    result.expect_err("parse should fail").kind
}

// ============================================================================
// Entry point
// ============================================================================

#[test]
fn empty_entry_point_gives_empty_agenda() {
    let f = fixture();
    assert!(f.parse("Arts{}").unwrap().is_empty());
    assert!(f.parse("  # header\nArts {\n}\n# trailing comment\n").unwrap().is_empty());
}

#[test]
fn end_of_text_right_after_closing_brace_is_fine() {
    let f = fixture();
    assert!(f.parse("Arts{Copy(a,b)}").is_ok());
}

#[test]
fn entry_point_name_is_enforced() {
    let f = fixture();
    let err = f.parse("Loop{}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::WrongEntryPoint);
    assert_eq!(err.message, "The outermost method must be Arts, but it is Loop.");
}

#[test]
fn entry_point_name_is_configurable() {
    let f = fixture();
    let config = ParserConfig::new().with_entry_point("Main");
    assert!(f.parse_with("Main{}", &InMemoryResolver::new(), config.clone()).is_ok());
    assert_eq!(
        kind_of(f.parse_with("Arts{}", &InMemoryResolver::new(), config)),
        ErrorKind::WrongEntryPoint
    );
}

#[test]
fn entry_point_must_take_an_agenda() {
    let f = fixture();
    let config = ParserConfig::new().with_entry_point("Grid");
    assert_eq!(
        kind_of(f.parse_with("Grid{}", &InMemoryResolver::new(), config)),
        ErrorKind::WrongEntryPoint
    );
}

#[test]
fn include_cannot_be_the_entry_point() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("INCLUDE \"x.arts\"")), ErrorKind::WrongEntryPoint);
}

#[test]
fn text_after_the_entry_point_is_rejected() {
    let f = fixture();
    let err = f.parse("Arts{}\nCopy(a,b)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedChar);
    assert_eq!(err.position, Some(Position::new("main.arts", 2, 1)));
}

#[test]
fn empty_file_is_eot() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("")), ErrorKind::Eot);
    assert_eq!(kind_of(f.parse("  # nothing here\n")), ErrorKind::Eot);
}

#[test]
fn unterminated_body_is_eot() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("Arts{ Copy(a,b)")), ErrorKind::Eot);
}

// ============================================================================
// Variables and generic resolution
// ============================================================================

#[test]
fn generic_copy_resolves_by_first_variable() {
    let f = fixture();
    let agenda = f.parse("Arts{ Copy(a,b) }").unwrap();
    assert_eq!(agenda.len(), 1);
    let statement = &agenda.statements[0];
    assert_eq!(f.name(statement), "Copy_Vector");
    assert_eq!(statement.outputs, vec![f.var("a")]);
    assert_eq!(statement.inputs, vec![f.var("b")]);
    assert_eq!(statement.position, Position::new("main.arts", 1, 7));
}

#[test]
fn generic_copy_resolves_matrix_variant() {
    let f = fixture();
    let agenda = f.parse("Arts{ Copy(m, m) }").unwrap();
    assert_eq!(f.name(&agenda.statements[0]), "Copy_Matrix");
}

#[test]
fn mismatched_groups_name_expected_and_actual() {
    let f = fixture();
    let err = f.parse("Arts{ Copy(a,m) }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::WrongWsvGroup);
    assert!(err.message.contains("group Matrix"), "{}", err.message);
    assert!(err.message.contains("expects group Vector"), "{}", err.message);
    assert_eq!(err.position, Some(Position::new("main.arts", 1, 14)));
}

#[test]
fn missing_specialization_is_unknown_method() {
    let f = fixture();
    let err = f.parse("Arts{ Copy(s,s) }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownMethod);
    assert_eq!(err.message, "Method `Copy` has no variant for group `Numeric`.");
}

#[test]
fn concrete_methods_check_every_slot() {
    let f = fixture();
    assert!(f.parse("Arts{ Scale(a, b, s) }").is_ok());
    assert_eq!(kind_of(f.parse("Arts{ Scale(a, s, b) }")), ErrorKind::WrongWsvGroup);
}

#[test]
fn unknown_names() {
    let f = fixture();
    let err = f.parse("Arts{ Nope() }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownMethod);
    assert_eq!(err.message, "Unknown method `Nope`.");

    let err = f.parse("Arts{ Copy(a, zz) }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownWsv);
    assert_eq!(err.message, "Unknown workspace variable `zz`.");
}

#[test]
fn variable_list_arity_is_enforced() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("Arts{ Copy(a) }")), ErrorKind::UnexpectedChar);
    assert_eq!(kind_of(f.parse("Arts{ Copy(a, b, b) }")), ErrorKind::UnexpectedChar);
    assert_eq!(kind_of(f.parse("Arts{ Copy }")), ErrorKind::UnexpectedChar);
    assert_eq!(kind_of(f.parse("Arts{ Copy(, b) }")), ErrorKind::UnexpectedChar);
}

#[test]
fn zero_slot_methods_accept_optional_empty_parens() {
    let f = fixture();
    let a = f.parse("Arts{ Grid }").unwrap();
    let b = f.parse("Arts{ Grid() }").unwrap();
    let c = f.parse("Arts{ Grid ( ) {} }").unwrap();
    assert!(a.binds_like(&b));
    assert!(a.binds_like(&c));
    assert_eq!(kind_of(f.parse("Arts{ Grid(a) }")), ErrorKind::UnexpectedChar);
}

#[test]
fn variable_list_may_span_lines_with_comments() {
    let f = fixture();
    let compact = f.parse("Arts{Copy(a,b)}").unwrap();
    let spread = f.parse("Arts {\n  Copy( a ,  # target\n        b )\n}\n").unwrap();
    assert!(compact.binds_like(&spread));
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn keywords_bind_in_declaration_order() {
    let f = fixture();
    let one = f.parse("Arts{ f{x=1 y=\"a\"} }").unwrap();
    let two = f.parse("Arts{ f{ y = \"a\", x = 1 } }").unwrap();
    assert!(one.binds_like(&two));
    assert_eq!(
        one.statements[0].keyword_values(),
        &[Value::Integer(1), Value::String("a".into())]
    );
}

#[test]
fn omitted_keywords_take_their_default() {
    let f = fixture();
    let agenda = f.parse("Arts{ f{x=3} }").unwrap();
    assert_eq!(
        agenda.statements[0].keyword_values(),
        &[Value::Integer(3), Value::String("dflt".into())]
    );
}

#[test]
fn defaults_cover_every_value_kind() {
    let f = fixture();
    let agenda = f.parse("Arts{ Scale(a, b, s) Grid }").unwrap();
    assert_eq!(
        agenda.statements[0].keyword_values(),
        &[Value::Float(1.0), Value::IntegerList(vec![1, 2])]
    );
    assert_eq!(
        agenda.statements[1].keyword_values(),
        &[Value::Integer(10), Value::StringList(vec![])]
    );
}

#[test]
fn duplicate_keyword_is_parse_error() {
    let f = fixture();
    let err = f.parse("Arts{ f{x=1,x=2} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.message, "Keyword x was already set.");
}

#[test]
fn missing_required_keyword_is_parse_error() {
    let f = fixture();
    let err = f.parse("Arts{ f{y=\"z\"} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.message, "Required keyword x of method f was not set.");
}

#[test]
fn braces_are_required_when_a_keyword_has_no_default() {
    let f = fixture();
    let err = f.parse("Arts{ f }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedChar);
    assert_eq!(err.message, "Expected '{', but got '}'.");
}

#[test]
fn unknown_keyword() {
    let f = fixture();
    let err = f.parse("Arts{ f{z=1} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedKeyword);
    assert_eq!(err.message, "Method f has no keyword z.");
}

#[test]
fn keyword_names_are_case_sensitive() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("Arts{ f{X=1} }")), ErrorKind::UnexpectedKeyword);
}

#[test]
fn missing_equals_sign() {
    let f = fixture();
    let err = f.parse("Arts{ f{x 1} }").unwrap_err();
    assert_eq!(err.message, "Expected '=', but got '1'.");
}

#[test]
fn single_keyword_shorthand() {
    let f = fixture();
    let long = f.parse("Arts{ Set(a){value=[1, 2.5]} }").unwrap();
    let short = f.parse("Arts{ Set(a){[1, 2.5]} }").unwrap();
    assert!(long.binds_like(&short));
    assert_eq!(long.statements[0].keyword_values(), &[Value::FloatList(vec![1.0, 2.5])]);
}

#[test]
fn shorthand_twice_is_duplicate() {
    let f = fixture();
    let err = f.parse("Arts{ Set(a){[1] [2]} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.message, "Keyword value was already set.");
}

#[test]
fn broken_default_is_parse_error() {
    let f = fixture();
    let err = f.parse("Arts{ Broken }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.starts_with("Default value ten of keyword n of method Broken"), "{}", err.message);
}

#[test]
fn explicit_value_overrides_a_broken_default() {
    let f = fixture();
    let agenda = f.parse("Arts{ Broken{n=3} }").unwrap();
    assert_eq!(agenda.statements[0].keyword_values(), &[Value::Integer(3)]);
}

#[test]
fn trailing_comma_in_list_value_fails() {
    let f = fixture();
    let err = f.parse("Arts{ Scale(a, b, s){ ids=[1,2,] } }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedChar);
    assert_eq!(err.message, "Expected digit, but got ']'.");

    let err = f.parse("Arts{ Set(a){value=[1,2,]} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
}

#[test]
fn unterminated_string_value() {
    let f = fixture();
    let err = f.parse("Arts{ f{x=1 y=\"abc\n} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalLinebreak);
    assert_eq!(err.message, "Line break before end of String.");
}

#[test]
fn keyword_body_on_agenda_method_is_a_statement_list() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("Arts{ Loop{ x=1 } }")), ErrorKind::UnknownMethod);
}

// ============================================================================
// Nested agendas and includes
// ============================================================================

#[test]
fn nested_agenda_bodies() {
    let f = fixture();
    let agenda = f.parse("Arts{ Loop{ Copy(a,b) Loop{} } Grid }").unwrap();
    assert_eq!(agenda.len(), 2);
    let inner = agenda.statements[0].agenda().unwrap();
    assert_eq!(inner.len(), 2);
    assert_eq!(f.name(&inner.statements[0]), "Copy_Vector");
    assert!(inner.statements[1].agenda().unwrap().is_empty());
    assert!(agenda.statements[1].agenda().is_none());
}

#[test]
fn agenda_method_without_braces_has_empty_body() {
    let f = fixture();
    let agenda = f.parse("Arts{ Loop }").unwrap();
    assert!(agenda.statements[0].agenda().unwrap().is_empty());
}

#[test]
fn includes_are_spliced_in_order() {
    let f = fixture();
    let resolver = InMemoryResolver::new()
        .with_file("common.arts", "Copy(a,b)\nINCLUDE \"grid.arts\"\n")
        .with_file("grid.arts", "# grid setup\nGrid{n=3}\n");
    let agenda = f
        .parse_with(
            "Arts{\n  Copy(m,m)\n  INCLUDE \"common.arts\"\n  Loop{ INCLUDE \"grid.arts\" }\n}",
            &resolver,
            ParserConfig::default(),
        )
        .unwrap();

    let names: Vec<_> = agenda.iter().map(|s| f.name(s)).collect();
    assert_eq!(names, vec!["Copy_Matrix", "Copy_Vector", "Grid", "Loop"]);
    let grid = &agenda.statements[2];
    assert_eq!(grid.position, Position::new("grid.arts", 2, 1));
    assert_eq!(agenda.statements[3].agenda().unwrap().len(), 1);
}

#[test]
fn errors_inside_includes_point_into_the_included_file() {
    let f = fixture();
    let resolver = InMemoryResolver::new().with_file("bad.arts", "\n  Copy(a, nope)\n");
    let err = f
        .parse_with("Arts{ INCLUDE \"bad.arts\" }", &resolver, ParserConfig::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownWsv);
    assert_eq!(err.position, Some(Position::new("bad.arts", 2, 11)));
}

#[test]
fn missing_include_is_reported_with_its_path() {
    let f = fixture();
    let err = f.parse("Arts{ INCLUDE \"missing.arts\" }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncludeNotFound);
    assert!(err.message.contains("missing.arts"));
    assert_eq!(err.position, Some(Position::new("main.arts", 1, 7)));
}

#[test]
fn include_path_must_be_a_string() {
    let f = fixture();
    assert_eq!(kind_of(f.parse("Arts{ INCLUDE common.arts }")), ErrorKind::UnexpectedChar);
}

#[test]
fn include_cycles_are_detected() {
    let f = fixture();
    let resolver = InMemoryResolver::new()
        .with_file("a.arts", "INCLUDE \"b.arts\"")
        .with_file("b.arts", "INCLUDE \"a.arts\"");
    let err = f
        .parse_with("Arts{ INCLUDE \"a.arts\" }", &resolver, ParserConfig::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncludeCycle);
    assert!(err.message.contains("main.arts -> a.arts -> b.arts -> a.arts"), "{}", err.message);
}

#[test]
fn nesting_depth_is_bounded() {
    let f = fixture();
    let config = ParserConfig::new().with_max_depth(3);
    let ok = "Arts{ Loop{ Loop{ } } }";
    let too_deep = "Arts{ Loop{ Loop{ Loop{ } } } }";
    assert!(f.parse_with(ok, &InMemoryResolver::new(), config.clone()).is_ok());
    assert_eq!(
        kind_of(f.parse_with(too_deep, &InMemoryResolver::new(), config)),
        ErrorKind::NestingTooDeep
    );
}

#[test]
fn parse_function_matches_parser() {
    let f = fixture();
    let resolver = InMemoryResolver::new();
    let agenda = parse(
        "main.arts",
        "Arts{ Copy(a,b) }",
        &f.methods,
        &f.variables,
        &resolver,
        ParserConfig::default(),
    )
    .unwrap();
    assert!(agenda.binds_like(&f.parse("Arts{Copy(a,b)}").unwrap()));
}
