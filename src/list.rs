use std::collections::hash_map::Values;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ListError;
use crate::models::HasName;
/// A list of things with aliases
///
/// This structure is used to hold the known currencies. Elements are found by name or by
/// alias, ignoring case.
///
/// It provides methods for:
/// - Adding new elements to the list
/// - Adding new aliases to existing elements
/// - Retrieving elements and the aliases pointing to them
///
/// # Examples
/// ```rust
/// use money::models::Currency;
/// use money::List;
///
/// let mut currencies = List::<Currency>::new();
/// let eur = Currency::new("Euro", "EUR").with_symbol("€");
/// currencies.insert(eur.clone());
/// currencies.insert(Currency::new("US Dollar", "USD"));
/// assert_eq!(currencies.len(), 2);
///
/// currencies.add_alias("€".to_string(), &eur).unwrap();
/// currencies.add_alias("euro".to_string(), &eur).unwrap();
/// assert_eq!(currencies.len_alias(), 4);
/// assert_eq!(currencies.get("eur").unwrap().as_ref(), &eur);
/// assert_eq!(currencies.get("EURO").unwrap(), currencies.get("€").unwrap());
/// assert!(currencies.get("gbp").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct List<T> {
    aliases: HashMap<String, String>,
    list: HashMap<String, Arc<T>>,
}

impl<T: HasName> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: HasName> List<T> {
    pub fn new() -> Self {
        let aliases: HashMap<String, String> = HashMap::new();
        let list: HashMap<String, Arc<T>> = HashMap::new();
        List { aliases, list }
    }

    /// Inserts an ```element``` in the list
    ///
    /// If there already is an element with that name, the list is left as it was and
    /// `false` is returned.
    pub fn insert(&mut self, element: T) -> bool {
        // Change the name which will be used as key to lowercase
        let name = element.get_name().to_lowercase();
        if self.list.contains_key(&name) {
            return false;
        }
        self.list.insert(name, Arc::new(element));
        true
    }
    /// Add an alias
    pub fn add_alias(&mut self, alias: String, for_element: &T) -> Result<(), ListError> {
        let target = for_element.get_name().to_lowercase();
        if !self.list.contains_key(&target) {
            return Err(self.not_found(for_element.get_name()));
        }
        let key = alias.to_lowercase();
        if key == target {
            return Ok(());
        }
        if self.list.contains_key(&key) {
            return Err(ListError::RepeatedAlias {
                alias,
                existing: key,
            });
        }
        match self.aliases.get(&key) {
            Some(x) if x == &target => Ok(()),
            Some(x) => Err(ListError::RepeatedAlias {
                alias,
                existing: x.clone(),
            }),
            None => {
                self.aliases.insert(key, target);
                Ok(())
            }
        }
    }

    pub fn get(&self, index: &str) -> Result<&Arc<T>, ListError> {
        let key = index.to_lowercase();
        match self.list.get(&key) {
            Some(x) => Ok(x),
            None => self
                .aliases
                .get(&key)
                .and_then(|name| self.list.get(name))
                .ok_or_else(|| self.not_found(index)),
        }
    }
    /// The aliases pointing to an element, sorted
    pub fn get_aliases(&self, element: &T) -> Vec<&str> {
        let name = element.get_name().to_lowercase();
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| **target == name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn values(&self) -> Values<'_, String, Arc<T>> {
        self.list.values()
    }
    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
    pub fn len_alias(&self) -> usize {
        self.aliases.len() + self.len()
    }

    fn not_found(&self, index: &str) -> ListError {
        ListError::AliasNotInList(format!(
            "{} {:?} not found",
            std::any::type_name::<T>(),
            index
        ))
    }
}

impl<T: Clone> List<T> {
    /// Adds the elements and aliases of ```other``` that are not in this list yet
    pub fn append(&mut self, other: &List<T>) {
        for (name, element) in other.list.iter() {
            self.list.entry(name.clone()).or_insert_with(|| element.clone());
        }
        for (alias, name) in other.aliases.iter() {
            if !self.list.contains_key(alias) {
                self.aliases
                    .entry(alias.clone())
                    .or_insert_with(|| name.clone());
            }
        }
    }
}
