use crate::{Connection, Entity, Executor, Query, Registry, Result, TableModel};

/// An executor paired with the registry of the entity types it serves.
///
/// ```rust,ignore
/// let mut db = Database::<SqliteConnection>::connect("sqlite://:memory:")?;
/// db.register::<Post>()?;
/// db.register::<Comment>()?;
/// let posts = db
///     .query::<Post>()
///     .join("Comment")
///     .filter(col("published").equal(true))
///     .order_by("title", Order::ASC)
///     .to_list(None)?;
/// ```
#[derive(Debug)]
pub struct Database<Exec: Executor> {
    executor: Exec,
    registry: Registry,
}

impl<Exec: Executor> Database<Exec> {
    pub fn new(executor: Exec) -> Self {
        Self {
            executor,
            registry: Registry::new(),
        }
    }

    pub fn register<E: Entity>(&mut self) -> Result<&TableModel> {
        self.registry.register::<E>()
    }

    /// Start a query over `E`.
    pub fn query<E: Entity>(&mut self) -> Query<'_, E, Exec> {
        Query::new(&mut self.executor, &self.registry)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn executor(&mut self) -> &mut Exec {
        &mut self.executor
    }

    pub fn into_inner(self) -> Exec {
        self.executor
    }
}

impl<C: Connection> Database<C> {
    pub fn connect(url: &str) -> Result<Self> {
        C::connect(url).map(Self::new)
    }
}
