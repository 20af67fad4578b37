use crate::datastore::DataStore;
use crate::traits::Record;

/// Generic store providing the shared CRUD semantics for one [`Record`] type
pub struct GenericStore<T: Record> {
    pub(crate) datastore: DataStore,
    pub(crate) _phantom: std::marker::PhantomData<T>,
}

impl<T: Record> Clone for GenericStore<T> {
    fn clone(&self) -> Self {
        Self::new(self.datastore.clone())
    }
}

impl<T: Record> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &T::table_name())
            .field("has_tenant", &self.datastore.tenant().is_some())
            .finish()
    }
}

impl<T: Record> GenericStore<T> {
    pub fn new(datastore: DataStore) -> Self {
        Self {
            datastore,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn datastore(&self) -> &DataStore {
        &self.datastore
    }
}
