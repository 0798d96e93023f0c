//! Both encodings of the fixture manifests.

mod common;

use folio_core::config::CoreConfig;
use folio_core::encode::encode;
use folio_core::fulltext::{enrich, FullTextStatus, KnownStatus};
use folio_core::media::MediaTypes;
use folio_core::pipeline::map_record;
use folio_core::version::PresentationVersion;
use serde_json::{json, Value};

fn manifest(name: &str) -> folio_core::model::Manifest {
    map_record(&common::record(name), &CoreConfig::default(), &MediaTypes::builtin())
        .unwrap()
        .manifest
}

fn v2(name: &str) -> Value {
    encode(&manifest(name), PresentationVersion::V2).to_value().unwrap()
}

fn v3(name: &str) -> Value {
    encode(&manifest(name), PresentationVersion::V3).to_value().unwrap()
}

#[test]
fn book_v2() {
    let v = v2("book.json");
    assert_eq!(v["@context"], "http://iiif.io/api/presentation/2/context.json");
    assert_eq!(v["@type"], "sc:Manifest");
    assert_eq!(
        v["label"],
        json!([{"@language": "en", "@value": "The Shipping Gazette"}, "Lloyd's List"])
    );
    assert_eq!(v["related"], "https://www.europeana.eu/item/9200397/BibliographicResource_3000126284212");
    assert_eq!(v["seeAlso"][0]["format"], "application/ld+json");

    let seq = &v["sequences"][0];
    assert_eq!(seq["label"], "Current Page Order");
    let canvases = seq["canvases"].as_array().unwrap();
    assert_eq!(canvases.len(), 3);
    assert_eq!(seq["startCanvas"], canvases[0]["@id"]);

    let res = &canvases[0]["images"][0]["resource"];
    assert_eq!(res["@type"], "dctypes:Image");
    assert_eq!(res["format"], "image/jpeg");
    assert_eq!(res["service"]["@id"], "https://iiif.example.org/image/gazette/p1");
    assert_eq!(res["service"]["@context"], "http://iiif.io/api/image/2/context.json");
    assert!(canvases[0].get("otherContent").is_none());
}

#[test]
fn book_v3() {
    let v = v3("book.json");
    assert_eq!(v["@context"][1], "http://iiif.io/api/presentation/3/context.json");
    assert_eq!(v["type"], "Manifest");
    assert_eq!(v["label"], json!({"en": ["The Shipping Gazette"], "none": ["Lloyd's List"]}));
    assert_eq!(v["navDate"], "1891-05-12T00:00:00Z");
    assert_eq!(v["provider"][0]["type"], "Agent");
    assert_eq!(v["seeAlso"][2]["type"], "Dataset");

    let items = v["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(v["start"]["id"], items[0]["id"]);
    let body = &items[0]["items"][0]["items"][0]["body"];
    assert_eq!(body["type"], "Image");
    assert_eq!(body["service"][0]["type"], "ImageService2");
    assert!(items[0]["items"][0]["items"][0].get("timeMode").is_none());
}

#[test]
fn manifest_without_canvases() {
    let v = v2("inconsistent.json");
    assert!(v.get("sequences").is_none());
    assert_eq!(v["label"], json!({"@language": "en", "@value": "Bound volume"}));

    let v = v3("inconsistent.json");
    assert_eq!(v["items"], json!([]));
    assert!(v.get("start").is_none());
}

#[test]
fn av_encodings() {
    let v = v3("euscreen.json");
    let ann = &v["items"][0]["items"][0]["items"][0];
    assert_eq!(ann["timeMode"], "trim");
    assert_eq!(ann["body"]["type"], "Video");
    assert!(ann["body"].get("format").is_none());

    let v = v2("video.json");
    let res = &v["sequences"][0]["canvases"][0]["images"][0]["resource"];
    assert_eq!(res["@type"], "dctypes:MovingImage");
}

#[test]
fn fulltext_references_in_both_encodings() {
    let mut m = manifest("book.json");
    let probe = KnownStatus::new(FullTextStatus::Exists);
    assert_eq!(enrich(&mut m, &CoreConfig::default().urls, &probe), Some(FullTextStatus::Exists));
    assert!(probe.was_used());

    let page2 = "https://iiif.europeana.eu/presentation/9200397/BibliographicResource_3000126284212/annopage/2";
    let v = encode(&m, PresentationVersion::V2).to_value().unwrap();
    assert_eq!(v["sequences"][0]["canvases"][1]["otherContent"], json!([page2]));

    let v = encode(&m, PresentationVersion::V3).to_value().unwrap();
    assert_eq!(
        v["items"][1]["annotations"],
        json!([{"id": page2, "type": "AnnotationPage"}])
    );
}

#[test]
fn fulltext_absent_leaves_manifest_untouched() {
    let original = manifest("book.json");
    for status in [FullTextStatus::NotExists, FullTextStatus::Unknown] {
        let mut m = original.clone();
        assert_eq!(enrich(&mut m, &CoreConfig::default().urls, &KnownStatus::new(status)), Some(status));
        assert_eq!(m, original);
    }
}

#[test]
fn pretty_output_is_stable() {
    let m = manifest("book.json");
    let a = encode(&m, PresentationVersion::V3).to_json_string(true).unwrap();
    let b = encode(&m, PresentationVersion::V3).to_json_string(true).unwrap();
    assert_eq!(a, b);
    assert!(a.contains('\n'));
}
