//! Benchmarks for document decoding and handler dispatch.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use activity_vocab::alias::AliasMap;
use activity_vocab::catalogue::Catalogue;
use activity_vocab::resolve::{InterfaceResolver, JsonResolver, Resolver};
use activity_vocab::vocab::capability::{Activity, Object};
use activity_vocab::vocab::{Announce, Create, Like, Note, TypedValue};

fn create_document() -> Value {
    json!({
        "@context": [
            "https://www.w3.org/ns/activitystreams",
            {"toot": "http://joinmastodon.org/ns", "sensitive": "as:sensitive"}
        ],
        "id": "https://example.com/users/alice/statuses/1/activity",
        "type": "Create",
        "actor": "https://example.com/users/alice",
        "published": "2024-05-01T10:00:00Z",
        "to": ["https://www.w3.org/ns/activitystreams#Public"],
        "cc": ["https://example.com/users/alice/followers"],
        "object": {
            "id": "https://example.com/users/alice/statuses/1",
            "type": "Note",
            "content": "<p>hello</p>",
            "sensitive": false,
            "tag": [{"type": "Hashtag", "href": "https://example.com/tags/rust", "name": "#rust"}]
        }
    })
}

fn json_resolver(catalogue: &Arc<Catalogue>) -> JsonResolver<u64> {
    let mut resolver = JsonResolver::new(Arc::clone(catalogue));
    resolver
        .on::<Like, _>(|n: &mut u64, _| {
            *n += 1;
            Ok(())
        })
        .unwrap()
        .on::<Announce, _>(|n: &mut u64, _| {
            *n += 2;
            Ok(())
        })
        .unwrap()
        .on::<Create, _>(|n: &mut u64, _| {
            *n += 3;
            Ok(())
        })
        .unwrap();
    resolver
}

fn bench_alias_map(c: &mut Criterion) {
    let doc = create_document();
    let context = &doc["@context"];
    c.bench_function("alias_map_from_context", |bench| {
        bench.iter(|| black_box(AliasMap::from_context(black_box(context))))
    });
}

fn bench_decode(c: &mut Criterion) {
    let catalogue = Catalogue::standard();
    let doc = create_document();
    c.bench_function("decode_create_document", |bench| {
        bench.iter(|| black_box(catalogue.decode_document(black_box(&doc)).unwrap()))
    });
}

fn bench_json_dispatch(c: &mut Criterion) {
    let catalogue = Arc::new(Catalogue::standard());
    let resolver = json_resolver(&catalogue);
    let doc = create_document();
    c.bench_function("json_resolver_create", |bench| {
        bench.iter(|| {
            let mut n = 0;
            resolver.resolve(&mut n, black_box(&doc)).unwrap();
            black_box(n)
        })
    });
}

fn bench_interface_dispatch(c: &mut Criterion) {
    let catalogue = Arc::new(Catalogue::standard());
    let mut resolver: InterfaceResolver<u64> = InterfaceResolver::new(catalogue);
    resolver
        .on::<Activity, _>(|n, _| {
            *n += 1;
            Ok(())
        })
        .unwrap()
        .on::<Object, _>(|n, _| {
            *n += 2;
            Ok(())
        })
        .unwrap();
    let values: [TypedValue; 2] = [Create::new().into(), Note::new().into()];
    c.bench_function("interface_resolver_mixed", |bench| {
        bench.iter(|| {
            let mut n = 0;
            for value in &values {
                resolver.resolve(&mut n, black_box(value)).unwrap();
            }
            black_box(n)
        })
    });
}

criterion_group!(
    benches,
    bench_alias_map,
    bench_decode,
    bench_json_dispatch,
    bench_interface_dispatch
);
criterion_main!(benches);
