//! Shared fixtures for rdfmap-core integration tests.
//!
//! Fixture types cover the binding features exercised across the test crates:
//! scalar members of every native kind, related records (eager and lazy),
//! ordered lists, language tags, inheritance and abstract types.

// Not every test crate uses every fixture.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rdfmap_core::{
    AssignError, Engine, EngineConfig, Entity, EntityDescriptor, EntityType, Graph,
    GraphSource, MemberDescriptor, MemorySource, RdfId, Reference, SharedSource, SourceError,
    Value, ValueKind,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const EX: &str = "http://example.org/ns#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

pub fn foaf(local: &str) -> String {
    format!("{FOAF}{local}")
}

// =============================================================================
// Tracing
// =============================================================================

/// Route engine logs to the test writer for the current thread
pub fn init_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

// =============================================================================
// Engines and sources
// =============================================================================

pub fn config() -> EngineConfig {
    EngineConfig {
        default_language: "en".to_string(),
        ..EngineConfig::default()
    }
}

/// Engine with every concrete fixture registered
pub fn engine_with(config: EngineConfig) -> Engine {
    let engine = Engine::new(config);
    engine
        .init([
            EntityType::of::<Person>(),
            EntityType::of::<Employee>(),
            EntityType::of::<Playlist>(),
            EntityType::of::<Node>(),
            EntityType::of::<Label>(),
            EntityType::of::<Document>(),
        ])
        .expect("fixtures register");
    engine
}

pub fn engine() -> Engine {
    engine_with(config())
}

pub fn source_of(graph: Graph) -> SharedSource {
    MemorySource::from_graph(graph).into_shared()
}

/// Source backed by a graph that counts `describe` calls
#[derive(Debug)]
pub struct CountingSource {
    inner: MemorySource,
    describes: AtomicUsize,
}

impl CountingSource {
    pub fn new(graph: Graph) -> Arc<Self> {
        Arc::new(Self {
            inner: MemorySource::from_graph(graph),
            describes: AtomicUsize::new(0),
        })
    }

    pub fn describes(&self) -> usize {
        self.describes.load(Ordering::SeqCst)
    }
}

impl GraphSource for CountingSource {
    fn describe(&self, id: &rdfmap_core::ResourceId) -> Result<Graph, SourceError> {
        self.describes.fetch_add(1, Ordering::SeqCst);
        self.inner.describe(id)
    }

    fn graph_query(&self, query: &str) -> Result<Graph, SourceError> {
        self.inner.graph_query(query)
    }
}

// =============================================================================
// Fixture types
// =============================================================================

#[derive(Debug, Default)]
pub struct Person {
    pub id: RdfId,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub active: Option<bool>,
    pub born: Option<DateTime<Utc>>,
    pub initial: Option<char>,
    pub homepage: Option<String>,
    pub knows: Option<Reference>,
    pub friends: Vec<Reference>,
    pub nicknames: Vec<String>,
    pub scratch: Option<String>,
}

impl Entity for Person {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("foaf:Person")
            .namespace("foaf", FOAF)
            .entity()
            .member(MemberDescriptor::new("name", ValueKind::String).predicate("foaf:name"))
            .member(MemberDescriptor::new("age", ValueKind::Int).predicate("foaf:age"))
            .member(MemberDescriptor::new("weight", ValueKind::Double))
            .member(MemberDescriptor::new("active", ValueKind::Bool))
            .member(MemberDescriptor::new("born", ValueKind::DateTime).predicate("foaf:birthday"))
            .member(MemberDescriptor::new("initial", ValueKind::Char))
            .member(MemberDescriptor::new("homepage", ValueKind::Uri).predicate("foaf:homepage"))
            .member(
                MemberDescriptor::new("knows", ValueKind::entity(EntityType::of::<Person>()))
                    .predicate("foaf:knows"),
            )
            .member(
                MemberDescriptor::new("friends", ValueKind::entity(EntityType::of::<Person>()))
                    .predicate("foaf:friend")
                    .collection(),
            )
            .member(
                MemberDescriptor::new("nicknames", ValueKind::String)
                    .predicate("foaf:nick")
                    .collection(),
            )
            .member(MemberDescriptor::new("scratch", ValueKind::String).transient())
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "name" => self.name.clone().map(Value::from),
            "age" => self.age.map(Value::from),
            "weight" => self.weight.map(Value::from),
            "active" => self.active.map(Value::from),
            "born" => self.born.map(Value::from),
            "initial" => self.initial.map(Value::from),
            "homepage" => self.homepage.clone().map(Value::Uri),
            "knows" => self.knows.clone().map(Value::from),
            "friends" => Some(self.friends.clone().into()),
            "nicknames" => Some(self.nicknames.clone().into()),
            "scratch" => self.scratch.clone().map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "name" => self.name = Some(value.try_into()?),
            "age" => self.age = Some(value.try_into()?),
            "weight" => self.weight = Some(value.try_into()?),
            "active" => self.active = Some(value.try_into()?),
            "born" => self.born = Some(value.try_into()?),
            "initial" => self.initial = Some(value.try_into()?),
            "homepage" => self.homepage = Some(value.try_into()?),
            "knows" => self.knows = Some(value.try_into()?),
            "friends" => self.friends = value.try_into()?,
            "nicknames" => self.nicknames = value.try_into()?,
            "scratch" => self.scratch = Some(value.try_into()?),
            other => return Err(AssignError::UnknownMember(other.to_string())),
        }
        Ok(())
    }
}

/// Person subtype; inherits every Person member
#[derive(Debug, Default)]
pub struct Employee {
    pub person: Person,
    pub company: Option<String>,
}

impl Entity for Employee {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("ex:Employee")
            .namespace("ex", EX)
            .parent(EntityType::of::<Person>())
            .inherit()
            .member(MemberDescriptor::new("company", ValueKind::String).predicate("ex:company"))
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        self.person.rdf_id()
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "company" => self.company.clone().map(Value::from),
            other => self.person.get(other),
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "company" => self.company = Some(value.try_into()?),
            other => return self.person.set(other, value),
        }
        Ok(())
    }
}

/// Ordered members
#[derive(Debug, Default)]
pub struct Playlist {
    pub id: RdfId,
    pub title: Option<String>,
    pub tracks: Vec<String>,
    pub ratings: Vec<i32>,
}

impl Entity for Playlist {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("ex:Playlist")
            .namespace("ex", EX)
            .id_member_in("title", "http://example.org/playlists/")
            .member(MemberDescriptor::new("title", ValueKind::String).predicate("ex:title"))
            .member(
                MemberDescriptor::new("tracks", ValueKind::String)
                    .predicate("ex:tracks")
                    .list(),
            )
            .member(MemberDescriptor::new("ratings", ValueKind::Int).predicate("ex:ratings").list())
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "title" => self.title.clone().map(Value::from),
            "tracks" => Some(self.tracks.clone().into()),
            "ratings" => Some(self.ratings.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "title" => self.title = Some(value.try_into()?),
            "tracks" => self.tracks = value.try_into()?,
            "ratings" => self.ratings = value.try_into()?,
            other => return Err(AssignError::UnknownMember(other.to_string())),
        }
        Ok(())
    }
}

/// Linked nodes; `next` is eager, `later` is lazy
#[derive(Debug, Default)]
pub struct Node {
    pub id: RdfId,
    pub label: Option<String>,
    pub next: Option<Reference>,
    pub later: Option<Reference>,
}

impl Entity for Node {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("ex:Node")
            .namespace("ex", EX)
            .member(MemberDescriptor::new("label", ValueKind::String).predicate("ex:label"))
            .member(
                MemberDescriptor::new("next", ValueKind::entity(EntityType::of::<Node>()))
                    .predicate("ex:next"),
            )
            .member(
                MemberDescriptor::new("later", ValueKind::entity(EntityType::of::<Node>()))
                    .predicate("ex:later")
                    .lazy(),
            )
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "label" => self.label.clone().map(Value::from),
            "next" => self.next.clone().map(Value::from),
            "later" => self.later.clone().map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "label" => self.label = Some(value.try_into()?),
            "next" => self.next = Some(value.try_into()?),
            "later" => self.later = Some(value.try_into()?),
            other => return Err(AssignError::UnknownMember(other.to_string())),
        }
        Ok(())
    }
}

/// Language-tagged member
#[derive(Debug, Default)]
pub struct Label {
    pub id: RdfId,
    pub text: Option<String>,
    pub plain: Option<String>,
}

impl Entity for Label {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("ex:Label")
            .namespace("ex", EX)
            .member(
                MemberDescriptor::new("text", ValueKind::String)
                    .predicate("ex:text")
                    .language("en"),
            )
            .member(MemberDescriptor::new("plain", ValueKind::String).predicate("ex:plain"))
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "text" => self.text.clone().map(Value::from),
            "plain" => self.plain.clone().map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "text" => self.text = Some(value.try_into()?),
            "plain" => self.plain = Some(value.try_into()?),
            other => return Err(AssignError::UnknownMember(other.to_string())),
        }
        Ok(())
    }
}

/// Untyped related member, raw resource member, and an abstract-typed member
#[derive(Debug, Default)]
pub struct Document {
    pub id: RdfId,
    pub topic: Option<Reference>,
    pub source: Option<rdfmap_core::ResourceId>,
    pub author: Option<Reference>,
    pub link: Option<String>,
}

impl Entity for Document {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new()
            .class("ex:Document")
            .namespace("ex", EX)
            .member(MemberDescriptor::new("topic", ValueKind::Ref(None)).predicate("ex:topic"))
            .member(MemberDescriptor::new("source", ValueKind::Resource).predicate("ex:source"))
            .member(MemberDescriptor::new("author", ValueKind::entity(agent())).predicate("ex:author"))
            .member(
                MemberDescriptor::new("link", ValueKind::Uri)
                    .predicate("ex:link")
                    .xsd_uri(),
            )
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, member: &str) -> Option<Value> {
        match member {
            "topic" => self.topic.clone().map(Value::from),
            "source" => self.source.clone().map(Value::from),
            "author" => self.author.clone().map(Value::from),
            "link" => self.link.clone().map(Value::Uri),
            _ => None,
        }
    }

    fn set(&mut self, member: &str, value: Value) -> Result<(), AssignError> {
        match member {
            "topic" => self.topic = Some(value.try_into()?),
            "source" => self.source = Some(value.try_into()?),
            "author" => self.author = Some(value.try_into()?),
            "link" => self.link = Some(value.try_into()?),
            other => return Err(AssignError::UnknownMember(other.to_string())),
        }
        Ok(())
    }
}

/// Abstract agent; instances are synthesized property bags
pub trait Agent {}

fn agent_descriptor() -> EntityDescriptor {
    EntityDescriptor::new()
        .class("ex:Agent")
        .namespace("ex", EX)
        .member(MemberDescriptor::new("name", ValueKind::String).predicate("ex:agentName"))
        .member(
            MemberDescriptor::new("aliases", ValueKind::String)
                .predicate("ex:alias")
                .collection(),
        )
}

pub fn agent() -> EntityType {
    EntityType::abstract_of::<dyn Agent>(agent_descriptor)
}

/// Record lacking a class binding
#[derive(Debug, Default)]
pub struct Unmapped {
    pub id: RdfId,
}

impl Entity for Unmapped {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new().member(MemberDescriptor::new("x", ValueKind::String))
    }

    fn rdf_id(&self) -> Option<&RdfId> {
        Some(&self.id)
    }

    fn get(&self, _: &str) -> Option<Value> {
        None
    }

    fn set(&mut self, member: &str, _: Value) -> Result<(), AssignError> {
        Err(AssignError::UnknownMember(member.to_string()))
    }
}
