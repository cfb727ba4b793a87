//! End-to-end generation from XML catalogs.

use luameta_codegen::{
    CodegenError, DirectorySink, GeneratorConfig, Session, generate_from_file, generate_from_xml,
};
use luameta_schema::{SchemaError, parse_catalog};

const CATALOG: &str = r#"<typeCatalog rootNamespace="Barotrauma">
    <type key="object" namespace="System" name="Object"/>
    <type key="delegate" namespace="System" name="Delegate" base="object"/>
    <type key="multicast" namespace="System" name="MulticastDelegate" base="delegate"/>
    <type key="void" namespace="System" name="Void"/>
    <type key="string" name="string"/>
    <type key="int" name="int"/>
    <type key="bool" name="bool"/>
    <type key="float" namespace="System" name="Single"/>
    <type key="int&amp;" name="int&amp;"/>
    <type key="nullable" namespace="System" name="Nullable`1"/>
    <type key="float?" namespace="System" name="Nullable`1" definition="nullable" arguments="float"/>
    <type key="list" namespace="System.Collections.Generic" name="List`1"/>
    <type key="list_int" namespace="System.Collections.Generic" name="List`1"
          definition="list" arguments="int"/>
    <type key="dict" namespace="System.Collections.Generic" name="Dictionary`2"/>
    <type key="dict_string_list" namespace="System.Collections.Generic" name="Dictionary`2"
          definition="dict" arguments="string list_int"/>
    <type key="object[]" namespace="System" name="Object[]" element="object"/>
    <type key="Outer" namespace="Barotrauma" name="Outer"/>
    <type key="Outer+Handler" namespace="Barotrauma" name="Handler" declaring="Outer"
          base="multicast">
        <method name="Invoke" returns="bool">
            <param name="sender" type="object"/>
        </method>
    </type>
    <type key="Table" namespace="Barotrauma" name="Table" base="object">
        <field name="Lookup" type="dict_string_list"/>
        <field name="Weight" type="float?" visibility="private"/>
        <field name="&lt;Size&gt;k__BackingField" type="int" visibility="private"/>
        <property name="Size" type="int">
            <getter/>
            <setter visibility="family"/>
        </property>
        <property name="OnChange" type="Outer+Handler"><getter/></property>
        <method name="Foo" visibility="family">
            <param name="a" type="int"/>
        </method>
        <method name="Foo" visibility="family">
            <param name="a" type="int"/>
            <param name="b" type="string"/>
        </method>
        <method name="Foo" visibility="family">
            <param name="a" type="int"/>
            <param name="b" type="string"/>
            <param name="c" type="bool"/>
        </method>
        <method name="Log" visibility="family" static="true" returns="void">
            <param name="format" type="string"/>
            <param name="args" type="object[]" variadic="true"/>
        </method>
        <method name="op_Addition" visibility="family" static="true" specialName="true"
                returns="Table"/>
        <method name="Public" returns="int"/>
        <constructor>
            <param name="capacity" type="int" optional="true"/>
        </constructor>
    </type>
</typeCatalog>"#;

#[test]
fn test_generate_table_document() {
    let documents = generate_from_xml(CATALOG, &["Table"]).expect("generation succeeds");
    assert_eq!(documents.len(), 1);

    let text = &documents[0].text;
    let expected = "---@meta\n\
        ---@class Barotrauma.Table : System.Object\n\
        ---`Field Public Instance`\n\
        ---@field Lookup table<string, int[]>\n\
        ---`Field Private Instance`\n\
        ---@field Weight System.Single\n\
        ---`Getter Public Instance`\n\
        ---<br/>`Setter NonPublic Instance`\n\
        ---@field Size int\n\
        ---`Getter Public Instance`\n\
        ---@field OnChange Barotrauma.Outer.Handler\n\
        _G['Table'] = {}\n\
        \n\
        ---`Method NonPublic Instance`\n\
        ---@overload fun(a:int)\n\
        ---@overload fun(a:int, b:string)\n\
        ---@param a int\n\
        ---@param b string\n\
        ---@param c bool\n\
        _G['Table'].Foo = function(a, b, c) end\n\
        \n\
        ---`Method NonPublic Static`\n\
        ---@param format string\n\
        ---@param ... System.Object[]\n\
        _G['Table'].Log = function(format, args) end\n\
        \n\
        ---`Constructor Public Instance`\n\
        ---@param capacity? int\n\
        ---@return Barotrauma.Table\n\
        _G['Table'] = function(capacity) end\n\
        \n\
        ---`Constructor Public Instance`\n\
        ---@param capacity? int\n\
        ---@return Barotrauma.Table\n\
        _G['Table'].__new = function(capacity) end\n\
        \n";
    assert_eq!(text, expected);
}

#[test]
fn test_repeated_roots_yield_one_document() {
    let documents =
        generate_from_xml(CATALOG, &["Table", "Outer", "Table"]).expect("generation succeeds");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].clr_name, "Barotrauma.Outer");
}

#[test]
fn test_delegate_document() {
    let documents = generate_from_xml(CATALOG, &["Outer+Handler"]).expect("generation succeeds");
    let text = &documents[0].text;

    assert!(text.starts_with(
        "---@meta\n---@class Barotrauma.Outer.Handler : System.MulticastDelegate\n"
    ));
    assert!(text.contains("_G['Outer']['Handler'] = {}\n"));
}

#[test]
fn test_unknown_root() {
    let err = generate_from_xml(CATALOG, &["Missing"]).unwrap_err();
    assert!(matches!(err, CodegenError::UnknownType { ref type_name } if type_name == "Missing"));
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let xml = r#"<typeCatalog>
    <type key="A" name="A" base="B"/>
    <type key="B" name="B" base="A"/>
</typeCatalog>"#;
    let err = generate_from_xml(xml, &["A"]).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::CircularReference { .. })
    ));

    let err = generate_from_xml("<typeCatalog><type key=\"A\" base=\"Z\"/></typeCatalog>", &[])
        .unwrap_err();
    assert!(matches!(err, CodegenError::Parse(_)));
}

#[test]
fn test_structural_cycles_and_nested_types_are_errors() {
    let mixed_cycle = r#"<typeCatalog>
    <type key="list" namespace="System.Collections.Generic" name="List`1"/>
    <type key="A" namespace="System.Collections.Generic" name="List`1"
          definition="list" arguments="B"/>
    <type key="B" name="B[]" element="A"/>
</typeCatalog>"#;
    let err = generate_from_xml(mixed_cycle, &["A"]).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::CircularReference {
            relation: "type structure",
            ..
        })
    ));

    let nested = r#"<typeCatalog>
    <type key="A" name="A"><type key="X" name="X"/></type>
    <type key="B" name="B" base="A"/>
    <type key="C" name="C"><field name="Next" type="C"/></type>
</typeCatalog>"#;
    let err = generate_from_xml(nested, &["C"]).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Parse(luameta_schema::ParseError::InvalidStructure { .. })
    ));
}

#[test]
fn test_reachable_generation_to_directory() {
    let catalog = parse_catalog(CATALOG).expect("catalog parses");
    let table = catalog.type_by_key("Table").expect("Table declared");
    let mut session = Session::with_config(&catalog, GeneratorConfig::for_catalog(&catalog));

    let produced = session.generate_reachable(&[table]);
    assert_eq!(produced, session.documents().len());

    let names: Vec<&str> = session.documents().iter().map(|d| d.clr_name.as_str()).collect();
    assert_eq!(names[0], "Barotrauma.Table");
    for expected in [
        "System.Object",
        "string",
        "int",
        "bool",
        "System.Single",
        "Barotrauma.Outer.Handler",
        "System.MulticastDelegate",
        "System.Delegate",
    ] {
        assert!(names.contains(&expected), "missing document for {expected}");
    }
    // Containers and nullable wrappers are described through their element types.
    assert!(!names.iter().any(|n| n.contains("Dictionary") || n.contains("List")));

    let temp = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::new(temp.path()).expect("sink");
    assert_eq!(session.write_to(&mut sink).expect("write"), produced);

    let first = std::fs::read_to_string(temp.path().join("0.lua")).expect("first document");
    assert_eq!(first, session.documents()[0].text);
    assert!(temp.path().join(format!("{}.lua", produced - 1)).exists());
}

#[test]
fn test_generate_from_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("catalog.xml");
    std::fs::write(&path, CATALOG).expect("write catalog");

    let documents = generate_from_file(&path, &["Outer"]).expect("generation succeeds");
    assert_eq!(
        documents[0].text,
        "---@meta\n---@class Barotrauma.Outer\n_G['Outer'] = {}\n\n"
    );

    let err = generate_from_file(&temp.path().join("missing.xml"), &["Outer"]).unwrap_err();
    assert!(matches!(err, CodegenError::Io(_)));
}
