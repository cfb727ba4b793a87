//! Generates Lua annotation documents from an XML type catalog.
//!
//! Run with: `cargo run --example generate -- <catalog.xml> <out-dir> [root keys...]`
//!
//! Without arguments a small built-in catalog is documented into `./lua-meta`.
//! Without root keys every plain or delegate type of the catalog is a root.

use anyhow::{Context, bail};
use luameta::prelude::*;
use std::path::PathBuf;

const SAMPLE_CATALOG: &str = r#"<typeCatalog rootNamespace="Barotrauma">
    <type key="object" namespace="System" name="Object"/>
    <type key="int" namespace="System" name="Int32"/>
    <type key="float" namespace="System" name="Single"/>
    <type key="string" namespace="System" name="String"/>
    <type key="list" namespace="System.Collections.Generic" name="List`1"/>
    <type key="list_string" namespace="System.Collections.Generic" name="List`1"
          definition="list" arguments="string"/>
    <type key="Entity" namespace="Barotrauma" name="Entity" base="object">
        <field name="ID" type="int"/>
    </type>
    <type key="Item" namespace="Barotrauma.Items" name="Item" base="Entity">
        <field name="Condition" type="float"/>
        <property name="Tags" type="list_string"><getter/></property>
        <method name="Use" returns="int" visibility="family" virtual="true">
            <param name="deltaTime" type="float" optional="true"/>
        </method>
        <constructor><param name="id" type="int"/></constructor>
    </type>
</typeCatalog>"#;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (xml, out_dir) = match (args.next(), args.next()) {
        (Some(catalog), Some(out)) => {
            let xml = std::fs::read_to_string(&catalog)
                .with_context(|| format!("reading catalog {catalog}"))?;
            (xml, PathBuf::from(out))
        }
        (None, None) => (SAMPLE_CATALOG.to_string(), PathBuf::from("lua-meta")),
        _ => bail!("usage: generate <catalog.xml> <out-dir> [root keys...]"),
    };
    let keys: Vec<String> = args.collect();

    let catalog = parse_catalog(&xml).context("parsing catalog")?;
    validate_catalog(&catalog).context("validating catalog")?;

    let roots = if keys.is_empty() {
        catalog
            .iter()
            .filter(|(id, def)| {
                !def.is_by_ref() && Shape::classify(&catalog, *id).is_documentable()
            })
            .map(|(id, _)| id)
            .collect::<Vec<_>>()
    } else {
        keys.iter()
            .map(|key| {
                catalog
                    .type_by_key(key)
                    .with_context(|| format!("unknown root type '{key}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut session = Session::with_config(&catalog, GeneratorConfig::for_catalog(&catalog));
    let produced = session.generate_reachable(&roots);

    let mut sink = DirectorySink::new(&out_dir)?;
    session.write_to(&mut sink)?;

    println!(
        "Wrote {} documents to {} ({} descriptors)",
        produced,
        out_dir.display(),
        session.registry().len()
    );
    Ok(())
}
