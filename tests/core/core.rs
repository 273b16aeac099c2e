use nirmanakaya::core::assets;
use nirmanakaya::core::catalog::{self, Channel, House, SignatureKind};
use nirmanakaya::core::docs_cli::{self, DocsCli, DocsCommand};
use nirmanakaya::core::draw;
use nirmanakaya::core::error::NirmanakayaError;
use nirmanakaya::core::hotlink;
use nirmanakaya::core::prefs;
use nirmanakaya::core::prompt::{self, ThreadOp};
use nirmanakaya::core::spread::{self, SpreadMode};
use nirmanakaya::core::stance;
use nirmanakaya::core::status::Status;
use nirmanakaya::core::store::Store;
use nirmanakaya::core::validate;
use std::collections::HashSet;
use tempfile::tempdir;

#[test]
fn codex_docs_resolve_and_render() {
    let docs = assets::list_docs();
    assert!(docs.contains(&"OVERVIEW.md".to_string()));
    assert!(docs.contains(&"COLLABORATOR.md".to_string()));
    for doc in docs {
        let content = assets::get_doc(&doc).expect("listed doc should be readable");
        assert!(!content.trim().is_empty());
    }

    docs_cli::run_docs_cli(DocsCli { command: DocsCommand::List }).expect("docs list");
    docs_cli::run_docs_cli(DocsCli {
        command: DocsCommand::Show { path: "STATUSES.md".to_string() },
    })
    .expect("docs show existing");

    let missing = docs_cli::run_docs_cli(DocsCli {
        command: DocsCommand::Show { path: "NOPE.md".to_string() },
    });
    assert!(matches!(missing, Err(NirmanakayaError::NotFound(_))));
}

#[test]
fn catalog_spans_all_signatures_with_correct_kinds() {
    let all: Vec<_> = catalog::all_signatures().collect();
    assert_eq!(all.len(), 78);
    assert_eq!(catalog::signature(0).expect("in range").kind(), SignatureKind::Archetype);
    assert_eq!(catalog::signature(21).expect("in range").kind(), SignatureKind::Archetype);
    assert_eq!(catalog::signature(22).expect("in range").kind(), SignatureKind::Bound);
    assert_eq!(catalog::signature(61).expect("in range").kind(), SignatureKind::Bound);
    assert_eq!(catalog::signature(62).expect("in range").kind(), SignatureKind::Agent);
    assert_eq!(catalog::signature(77).expect("in range").kind(), SignatureKind::Agent);
    assert!(catalog::signature(78).is_err());

    // Anchor the corners so a reshuffled table cannot slip through.
    assert_eq!(catalog::signature(0).expect("in range").name(), "Potential");
    assert_eq!(catalog::signature(21).expect("in range").name(), "Wholeness");
    assert_eq!(catalog::signature(7).expect("in range").traditional(), "The Chariot");
    assert_eq!(catalog::signature(62).expect("in range").name(), "Initiate of Intent");
}

#[test]
fn associated_cards_partition_bounds_and_agents() {
    // Every bound and agent hangs off exactly one archetype, so walking
    // the 22 archetypes must visit all 40 bounds and 16 agents once.
    let mut bound_ids = HashSet::new();
    let mut agent_ids = HashSet::new();
    for archetype_id in 0..22u8 {
        let (bounds, agents) = catalog::associated_cards(archetype_id).expect("in range");
        for b in bounds {
            assert!(bound_ids.insert(b.id), "bound {} counted twice", b.id);
        }
        for a in agents {
            assert!(agent_ids.insert(a.id), "agent {} counted twice", a.id);
        }
    }
    assert_eq!(bound_ids.len(), 40);
    assert_eq!(agent_ids.len(), 16);
    assert!(catalog::associated_cards(22).is_err());
}

#[test]
fn houses_partition_the_archetypes() {
    for house in House::ALL {
        let members = catalog::ARCHETYPES.iter().filter(|a| a.house == house).count();
        let want = if house == House::Portal { 2 } else { 4 };
        assert_eq!(members, want, "house {}", house.as_str());
    }
    assert_eq!(catalog::house_of(7).expect("in range"), House::Emotion);
    assert_eq!(catalog::house_of(10).expect("in range"), House::Portal);
}

#[test]
fn every_channel_number_pair_resolves_one_bound() {
    for channel in Channel::ALL {
        for number in 1..=10u8 {
            let bound = catalog::bound_for(channel, number)
                .unwrap_or_else(|| panic!("no bound for {} {}", channel, number));
            assert_eq!(bound.channel, channel);
            assert_eq!(bound.number, number);
        }
    }
    assert!(catalog::bound_for(Channel::Intent, 0).is_none());
    assert!(catalog::bound_for(Channel::Intent, 11).is_none());
}

#[test]
fn validation_gates_pass_on_compiled_data() {
    let results = validate::run_gates();
    assert!(!results.is_empty());
    for gate in &results {
        assert!(
            gate.passed,
            "gate {} failed: {}",
            gate.gate,
            gate.failures.join("; ")
        );
    }
    // The digest is a function of the catalog alone.
    assert_eq!(validate::catalog_digest(), validate::catalog_digest());
    assert_eq!(validate::catalog_digest().len(), 64);
}

#[test]
fn full_width_spreads_exhaust_their_pools() {
    let draws = draw::generate_spread(22, false).expect("22 fits the position pool");
    let positions: HashSet<_> = draws.iter().map(|d| d.position.expect("positioned")).collect();
    assert_eq!(positions.len(), 22);

    let draws = draw::generate_spread(78, true).expect("78 fits the transient pool");
    let transients: HashSet<_> = draws.iter().map(|d| d.transient).collect();
    assert_eq!(transients.len(), 78);
    assert!(draws.iter().all(|d| d.position.is_none()));
    assert!(draws.iter().all(|d| (1..=4).contains(&(d.status as u8))));
}

#[test]
fn reading_request_carries_the_format_contract() {
    let draws = vec![
        nirmanakaya::core::draw::Draw {
            position: Some(4),
            transient: 7,
            status: Status::TooMuch,
        },
        nirmanakaya::core::draw::Draw {
            position: Some(9),
            transient: 30,
            status: Status::Balanced,
        },
    ];
    let stance = stance::delivery_preset("wise").expect("preset exists");
    let question = prompt::effective_question("  Where is the friction?  ", SpreadMode::Random);
    let request = prompt::reading_request(&question, SpreadMode::Random, "two", &stance, &draws)
        .expect("request assembles");

    assert!(request.system.contains("RESPONSE FORMAT:"));
    assert!(request.est_tokens > 0);
    assert_eq!(request.messages.len(), 1);
    let user = &request.messages[0].content;
    assert!(user.contains("QUESTION: \"Where is the friction?\""));
    assert!(user.contains("THE DRAW (Two Emergent):"));
    assert!(user.contains("**Signature 1"));
    assert!(user.contains("Too Much Drive"));
    assert!(user.contains("Correction: Position 14 Balance via DIAGONAL duality"));
    assert!(user.contains("No correction needed (Balanced)"));
}

#[test]
fn durable_request_names_frames_not_positions() {
    let draws = vec![
        nirmanakaya::core::draw::Draw { position: None, transient: 2, status: Status::Balanced },
        nirmanakaya::core::draw::Draw { position: None, transient: 3, status: Status::Balanced },
        nirmanakaya::core::draw::Draw { position: None, transient: 4, status: Status::Balanced },
    ];
    let text = prompt::format_draws(&draws, SpreadMode::Durable, "arc").expect("formats");
    assert!(text.contains("Situation (what is)"));
    assert!(text.contains("Movement (what's in motion)"));
    assert!(text.contains("Integration (what completes)"));

    assert!(prompt::format_draws(&draws, SpreadMode::Durable, "bogus").is_err());
}

#[test]
fn effective_question_substitutes_by_mode() {
    assert_eq!(prompt::effective_question("  ", SpreadMode::Random), "General reading");
    assert_eq!(prompt::effective_question("", SpreadMode::Durable), "General reading");
    assert_eq!(prompt::effective_question("", SpreadMode::Forge), "Forging intention");
    assert_eq!(prompt::effective_question(" real q ", SpreadMode::Forge), "real q");
}

#[test]
fn thread_ops_and_lenses_resolve_by_key() {
    assert_eq!(ThreadOp::from_key("reflect"), Some(ThreadOp::Reflect));
    assert_eq!(ThreadOp::from_key("forge"), Some(ThreadOp::Forge));
    assert_eq!(ThreadOp::from_key("meditate"), None);

    for key in ["unpack", "clarify", "architecture", "example"] {
        let lens = prompt::expansion_lens(key).unwrap_or_else(|| panic!("lens {}", key));
        assert_eq!(lens.key, key);
        assert!(!lens.prompt.is_empty());
        assert!(!lens.path_prompt.is_empty());
    }
    assert!(prompt::expansion_lens("squint").is_none());
}

#[test]
fn hotlink_annotates_catalog_terms_only() {
    let annotated = hotlink::annotate_markdown("Drive leans toward Balance, not laundry.");
    assert!(annotated.contains("**Drive**"));
    assert!(annotated.contains("**Balance**"));
    assert!(annotated.contains("not laundry."));
    assert!(!annotated.contains("**laundry**"));
}

#[test]
fn stance_presets_cover_all_axes() {
    for key in stance::PRESET_KEYS {
        let preset = stance::delivery_preset(key).expect("preset exists");
        let label = stance::stance_label(&preset);
        assert!(!label.is_empty());
    }
    assert!(stance::delivery_preset("nonexistent").is_none());
    let custom = stance::Stance::default();
    assert!(!stance::build_stance_prompt(&custom).is_empty());
}

#[test]
fn store_prefs_and_spread_defaults_cohere() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::at(tmp.path());

    // Defaults resolve to a real spread even before anything is saved.
    let p = prefs::load(&store).expect("defaults load");
    let count = spread::spread_count(p.mode, &p.spread).expect("default spread exists");
    assert_eq!(count, 3);

    let mut p = p;
    prefs::set_value(&mut p, "mode", "durable").expect("set mode");
    prefs::set_value(&mut p, "spread", "fiveHouse").expect("set spread");
    prefs::save(&store, &p).expect("save");

    let reloaded = prefs::load(&store).expect("reload");
    assert_eq!(spread::spread_count(reloaded.mode, &reloaded.spread).expect("resolves"), 5);
    assert_eq!(
        spread::spread_display_name(reloaded.mode, &reloaded.spread),
        "Five Houses"
    );
}

#[test]
fn suggestions_pool_is_well_formed() {
    assert_eq!(prompt::SUGGESTIONS.len(), 43);
    let distinct: HashSet<_> = prompt::SUGGESTIONS.iter().collect();
    assert_eq!(distinct.len(), prompt::SUGGESTIONS.len());
    for s in prompt::SUGGESTIONS {
        assert!(!s.trim().is_empty());
    }
}
