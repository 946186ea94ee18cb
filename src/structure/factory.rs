//! Structure selection by name

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::HashMapConfig;
use crate::dev_infrastructure::FactoryRegistry;
use crate::error::{ArboraError, Result};
use crate::hash_map::{ChainedHashMap, OpenHashMap};
use crate::key::Keyed;
use crate::tree::{AvlTree, RedBlackTree};

use super::AssociativeStructure;

/// The four selectable structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// [`AvlTree`]
    #[serde(rename = "avl")]
    Avl,
    /// [`RedBlackTree`]
    #[serde(rename = "rb", alias = "redblack")]
    RedBlack,
    /// [`OpenHashMap`]
    #[serde(rename = "open")]
    OpenHash,
    /// [`ChainedHashMap`]
    #[serde(rename = "chained", alias = "extern")]
    ChainedHash,
}

impl StructureKind {
    /// Every kind, trees first
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Avl,
        StructureKind::RedBlack,
        StructureKind::OpenHash,
        StructureKind::ChainedHash,
    ];

    /// Canonical selector
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Avl => "avl",
            StructureKind::RedBlack => "rb",
            StructureKind::OpenHash => "open",
            StructureKind::ChainedHash => "chained",
        }
    }

    /// True for the two trees
    pub fn is_tree(&self) -> bool {
        matches!(self, StructureKind::Avl | StructureKind::RedBlack)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureKind {
    type Err = ArboraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avl" => Ok(StructureKind::Avl),
            "rb" | "redblack" | "red-black" => Ok(StructureKind::RedBlack),
            "open" => Ok(StructureKind::OpenHash),
            "chained" | "extern" => Ok(StructureKind::ChainedHash),
            _ => Err(ArboraError::unknown_structure(s)),
        }
    }
}

/// Boxed structure as handed out by the factory
pub type BoxedStructure<T> = Box<dyn AssociativeStructure<T>>;

/// Creates structures from selector strings
///
/// Every [`StructureKind`] is registered under its canonical selector;
/// [`create`](StructureFactory::create) also accepts the aliases
/// [`StructureKind::from_str`] understands. Extra creators can be registered
/// under new names.
pub struct StructureFactory<T> {
    registry: FactoryRegistry<BoxedStructure<T>>,
}

impl<T> Debug for StructureFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureFactory")
            .field("registry", &self.registry)
            .finish()
    }
}

impl<T: Keyed + Debug + 'static> StructureFactory<T> {
    /// Factory with the four structures and default hash map sizing
    pub fn with_defaults() -> Result<Self> {
        Self::with_hash_configs(HashMapConfig::open_addressing(), HashMapConfig::chaining())
    }

    /// Factory whose hash maps are built from the given configurations
    pub fn with_hash_configs(open: HashMapConfig, chained: HashMapConfig) -> Result<Self> {
        let factory = Self {
            registry: FactoryRegistry::new(),
        };
        factory.register(StructureKind::Avl.as_str(), || {
            Ok(Box::new(AvlTree::<T>::new()) as BoxedStructure<T>)
        })?;
        factory.register(StructureKind::RedBlack.as_str(), || {
            Ok(Box::new(RedBlackTree::<T>::new()) as BoxedStructure<T>)
        })?;
        factory.register(StructureKind::OpenHash.as_str(), move || {
            Ok(Box::new(OpenHashMap::<T>::with_config(&open)) as BoxedStructure<T>)
        })?;
        factory.register(StructureKind::ChainedHash.as_str(), move || {
            Ok(Box::new(ChainedHashMap::<T>::with_config(&chained)) as BoxedStructure<T>)
        })?;
        Ok(factory)
    }

    /// Register an additional creator
    pub fn register<F>(&self, name: &str, creator: F) -> Result<()>
    where
        F: Fn() -> Result<BoxedStructure<T>> + Send + Sync + 'static,
    {
        self.registry.register(name, creator)
    }

    /// Build the structure registered under `name` or one of its aliases
    pub fn create(&self, name: &str) -> Result<BoxedStructure<T>> {
        if self.registry.contains(name)? {
            return self.registry.create(name);
        }
        let kind: StructureKind = name.parse()?;
        let structure = self.registry.create(kind.as_str())?;
        log::debug!("created {} for selector '{}'", structure.name(), name);
        Ok(structure)
    }

    /// Build the structure for `kind`
    pub fn create_kind(&self, kind: StructureKind) -> Result<BoxedStructure<T>> {
        self.registry.create(kind.as_str())
    }

    /// Registered selectors, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        self.registry.list_creators()
    }
}

/// Default-configured structure for `kind`
pub fn create_structure<T: Keyed + Debug + 'static>(kind: StructureKind) -> BoxedStructure<T> {
    match kind {
        StructureKind::Avl => Box::new(AvlTree::new()),
        StructureKind::RedBlack => Box::new(RedBlackTree::new()),
        StructureKind::OpenHash => Box::new(OpenHashMap::new()),
        StructureKind::ChainedHash => Box::new(ChainedHashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("avl".parse::<StructureKind>().unwrap(), StructureKind::Avl);
        assert_eq!("RB".parse::<StructureKind>().unwrap(), StructureKind::RedBlack);
        assert_eq!("redblack".parse::<StructureKind>().unwrap(), StructureKind::RedBlack);
        assert_eq!("open".parse::<StructureKind>().unwrap(), StructureKind::OpenHash);
        assert_eq!("extern".parse::<StructureKind>().unwrap(), StructureKind::ChainedHash);
        assert!("splay".parse::<StructureKind>().is_err());
        for kind in StructureKind::ALL {
            assert_eq!(kind.to_string().parse::<StructureKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StructureKind::ALL).unwrap();
        assert_eq!(json, r#"["avl","rb","open","chained"]"#);
        let parsed: Vec<StructureKind> = serde_json::from_str(r#"["redblack","extern"]"#).unwrap();
        assert_eq!(parsed, vec![StructureKind::RedBlack, StructureKind::ChainedHash]);
    }

    #[test]
    fn test_factory_creates_each_kind() {
        let factory = StructureFactory::<i32>::with_defaults().unwrap();
        assert_eq!(factory.names().unwrap(), vec!["avl", "chained", "open", "rb"]);
        let expected = [
            ("avl", "AVL Tree"),
            ("rb", "Red-Black Tree"),
            ("redblack", "Red-Black Tree"),
            ("open", "OpenHashMap"),
            ("chained", "ChainedHashMap"),
            ("extern", "ChainedHashMap"),
        ];
        for (selector, name) in expected {
            let mut s = factory.create(selector).unwrap();
            assert_eq!(s.name(), name);
            assert!(s.is_empty());
            s.insert(3).unwrap();
            assert!(s.contains(&3));
        }
    }

    #[test]
    fn test_factory_unknown_selector() {
        let factory = StructureFactory::<i32>::with_defaults().unwrap();
        match factory.create("btree") {
            Err(ArboraError::UnknownStructure { name }) => assert_eq!(name, "btree"),
            other => panic!("unexpected {:?}", other.map(|s| s.name())),
        }
    }

    #[test]
    fn test_custom_creator() {
        let factory = StructureFactory::<i32>::with_defaults().unwrap();
        factory
            .register("small-open", || {
                let config = HashMapConfig::open_addressing().with_capacity(3);
                Ok(Box::new(OpenHashMap::with_config(&config)) as BoxedStructure<i32>)
            })
            .unwrap();
        let s = factory.create("small-open").unwrap();
        assert_eq!(s.name(), "OpenHashMap");
        assert!(factory.register("avl", || Ok(create_structure(StructureKind::Avl))).is_err());
    }

    #[test]
    fn test_create_structure() {
        for kind in StructureKind::ALL {
            let s = create_structure::<(String, u32)>(kind);
            assert!(s.is_empty());
            assert_eq!(kind.is_tree(), s.name().contains("Tree"));
        }
    }
}
