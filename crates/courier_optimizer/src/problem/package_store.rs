use crate::problem::package::{Package, PackageId};

const DEFAULT_BUCKETS: usize = 10;

/// Chaining hash table from package id to package.
///
/// The bucket of a package is `id % buckets` and the table never grows, so a
/// lookup scans one bucket: O(n / buckets) for evenly spread ids, O(n) when
/// every id lands in the same bucket.
#[derive(Debug, Clone)]
pub struct PackageStore {
    buckets: Vec<Vec<(PackageId, Package)>>,
    len: usize,
}

impl Default for PackageStore {
    fn default() -> Self {
        PackageStore::with_buckets(DEFAULT_BUCKETS)
    }
}

impl PackageStore {
    pub fn with_buckets(buckets: usize) -> Self {
        PackageStore {
            buckets: vec![Vec::new(); buckets.max(1)],
            len: 0,
        }
    }

    #[inline]
    fn bucket(&self, id: PackageId) -> usize {
        id.get() as usize % self.buckets.len()
    }

    /// Inserts the package under its id, returning the package it replaced.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        let id = package.id();
        let index = self.bucket(id);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|(key, _)| *key == id) {
            return Some(std::mem::replace(&mut entry.1, package));
        }

        bucket.push((id, package));
        self.len += 1;
        None
    }

    pub fn lookup(&self, id: PackageId) -> Option<&Package> {
        self.buckets[self.bucket(id)]
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, package)| package)
    }

    pub fn lookup_mut(&mut self, id: PackageId) -> Option<&mut Package> {
        let index = self.bucket(id);
        self.buckets[index]
            .iter_mut()
            .find(|(key, _)| *key == id)
            .map(|(_, package)| package)
    }

    pub fn contains(&self, id: PackageId) -> bool {
        self.lookup(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// All packages in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        let mut packages = self
            .buckets
            .iter()
            .flatten()
            .map(|(_, package)| package)
            .collect::<Vec<_>>();
        packages.sort_by_key(|package| package.id());
        packages.into_iter()
    }
}

impl FromIterator<Package> for PackageStore {
    fn from_iter<T: IntoIterator<Item = Package>>(iter: T) -> Self {
        let mut store = PackageStore::default();
        for package in iter {
            store.insert(package);
        }
        store
    }
}
