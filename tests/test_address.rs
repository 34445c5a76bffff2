use ar_address_parser::{AddressKind, AddressParser, AddressResult};

fn parse(line: &str) -> AddressResult {
    AddressParser::new().parse(line)
}

#[test]
fn simple_street_and_number() {
    let result = parse("Sarmiento N° 1100");
    assert_eq!(result.kind, Some(AddressKind::Simple));
    assert_eq!(result.street_names, vec!["Sarmiento".to_string()]);
    let door = result.door_number.unwrap();
    assert_eq!(door.unit.as_deref(), Some("N°"));
    assert_eq!(door.value, "1100");
    assert_eq!(result.floor, None);
}

#[test]
fn between_clause_with_floor_and_door_unit() {
    let result = parse("Av. Libertador N1331 2ndo A e/25 de Mayo y Bartolome Mitre");
    assert_eq!(result.kind, Some(AddressKind::Between));
    assert_eq!(
        result.street_names,
        vec![
            "Av. Libertador".to_string(),
            "25 de Mayo".to_string(),
            "Bartolome Mitre".to_string(),
        ]
    );
    let door = result.door_number.unwrap();
    assert_eq!(door.unit.as_deref(), Some("N"));
    assert_eq!(door.value, "1331");
    assert_eq!(result.floor.as_deref(), Some("2ndo A"));
}

#[test]
fn intersection_with_and_word() {
    let result = parse("Tucuman y 9 de Julio");
    assert_eq!(result.kind, Some(AddressKind::Intersection));
    assert_eq!(
        result.street_names,
        vec!["Tucuman".to_string(), "9 de Julio".to_string()]
    );
    assert_eq!(result.door_number, None);
    assert_eq!(result.floor, None);
}

#[test]
fn trailing_locality_is_discarded() {
    let result = parse("Ruta 33 s/n Villa Chacon");
    assert_eq!(result.kind, Some(AddressKind::Simple));
    assert_eq!(result.street_names, vec!["Ruta 33".to_string()]);
    let door = result.door_number.unwrap();
    assert_eq!(door.unit, None);
    assert_eq!(door.value, "s/n");
    assert_eq!(result.floor, None);
}

#[test]
fn intersection_with_e_connector() {
    let result = parse("Cordoba e Hipolito Yrigoyen");
    assert_eq!(result.kind, Some(AddressKind::Intersection));
    assert_eq!(
        result.street_names,
        vec!["Cordoba".to_string(), "Hipolito Yrigoyen".to_string()]
    );
}

#[test]
fn door_number_bias_prefers_simple_over_intersection() {
    let result = parse("Vicente Lopez y Planes 120");
    assert_eq!(result.kind, Some(AddressKind::Simple));
    assert_eq!(
        result.street_names,
        vec!["Vicente Lopez y Planes".to_string()]
    );
    let door = result.door_number.unwrap();
    assert_eq!(door.unit, None);
    assert_eq!(door.value, "120");
}

#[test]
fn non_ascii_bytes_are_tolerated_verbatim() {
    let result = parse("sAnta fe 1000");
    assert_eq!(result.kind, Some(AddressKind::Simple));
    assert_eq!(result.street_names, vec!["sAnta fe".to_string()]);
    assert_eq!(result.door_number.unwrap().value, "1000");
}

#[test]
fn unrecognized_single_word_is_unknown() {
    assert_eq!(parse("qwerty"), AddressResult::unknown());
}

#[test]
fn empty_and_whitespace_only_input_is_unknown() {
    assert_eq!(parse(""), AddressResult::unknown());
    assert_eq!(parse("    "), AddressResult::unknown());
}

#[test]
fn single_number_alone_is_unknown() {
    assert_eq!(parse("1100"), AddressResult::unknown());
}

#[test]
fn two_numbers_joined_by_connector_is_unknown() {
    // Neither "y"-joined operand is a street name, so no alternative of `address` admits this.
    assert_eq!(parse("120 y 450"), AddressResult::unknown());
}

#[test]
fn repeated_parses_of_the_same_line_are_stable() {
    let mut parser = AddressParser::new();
    let a = parser.parse("Mitre 450");
    let b = parser.parse("Mitre 450");
    assert_eq!(a, b);
}

#[test]
fn cache_backed_parser_agrees_with_uncached_across_all_scenarios() {
    let lines = [
        "Sarmiento N° 1100",
        "Av. Libertador N1331 2ndo A e/25 de Mayo y Bartolome Mitre",
        "Tucuman y 9 de Julio",
        "Ruta 33 s/n Villa Chacon",
        "Cordoba e Hipolito Yrigoyen",
        "Vicente Lopez y Planes 120",
        "sAnta fe 1000",
        "qwerty",
    ];
    let mut cached = AddressParser::with_cache(ar_address_parser::MemoryParseCache::new());
    let mut uncached = AddressParser::new();
    for line in lines {
        assert_eq!(cached.parse(line), uncached.parse(line), "mismatch on {line:?}");
    }
}
