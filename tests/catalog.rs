mod common;

use common::{FileBuilder, channel_track};
use midilib::prelude::*;
use pretty_assertions::assert_eq;

fn parsed_song(name: &str) -> Song {
    let bytes = FileBuilder::new(0, 96).track(&channel_track(0, 0x3C)).build();
    Song::parse_named(name, &bytes).unwrap()
}

#[test]
fn cataloging_parsed_files_end_to_end() {
    let mut catalog = Catalog::new();
    for name in ["m", "d", "t", "b", "f", "p", "z"] {
        catalog.insert(parsed_song(name)).unwrap();
    }
    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.names(), ["b", "d", "f", "m", "p", "t", "z"]);

    // a duplicate bounces back without disturbing the tree
    let DuplicateSong(rejected) = catalog.insert(parsed_song("f")).unwrap_err();
    assert_eq!(rejected.name(), "f");
    assert_eq!(catalog.len(), 7);

    // removing an inner node with two children keeps the ordering intact
    catalog.remove("d").unwrap();
    assert_eq!(catalog.names(), ["b", "f", "m", "p", "t", "z"]);
    assert!(catalog.find("d").is_none());
    assert!(catalog.find("f").is_some());

    catalog.remove("d").unwrap_err();
}

#[test]
fn found_songs_can_still_be_read() {
    let mut catalog = Catalog::new();
    catalog.insert(parsed_song("anthem")).unwrap();

    let song = catalog.find("anthem").unwrap();
    assert_eq!(song.tracks().len(), 1);
    assert_eq!(song.tracks()[0].events()[0].note(), Some(0x3C));
}

#[test]
fn traversal_orders_visit_every_song_once() {
    let mut catalog = Catalog::new();
    for name in ["m", "d", "t"] {
        catalog.insert(parsed_song(name)).unwrap();
    }
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::InOrder,
        TraversalOrder::PostOrder,
    ] {
        let mut seen = Vec::new();
        catalog.traverse(order, |song| seen.push(song.name().to_owned()));
        seen.sort();
        assert_eq!(seen, ["d", "m", "t"]);
    }
}
