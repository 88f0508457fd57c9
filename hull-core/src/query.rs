use crate::{
    Aggregate, AsValue, Context, Driver, Entity, Executor, Expression, Hydrator, JoinTarget, Order,
    PredicateState, QueryError, Registry, Result, SelectKind, SqlWriter, TableModel, Value,
    truncate_long,
};
use std::{borrow::Cow, marker::PhantomData};

/// Single use query over entities of type `E`.
///
/// Builder methods take and return the query, terminal operations consume it
/// and issue exactly one statement.
///
/// ```rust,compile_fail,E0382
/// # use hull_core::{Entity, Executor, Query};
/// fn reuse<E: Entity, X: Executor>(query: Query<'_, E, X>) {
///     let _ = query.count();
///     let _ = query.count();
/// }
/// ```
pub struct Query<'d, E: Entity, Exec: Executor> {
    executor: &'d mut Exec,
    registry: &'d Registry,
    state: PredicateState,
    _entity: PhantomData<E>,
}

impl<'d, E: Entity, Exec: Executor> Query<'d, E, Exec> {
    pub fn new(executor: &'d mut Exec, registry: &'d Registry) -> Self {
        Self {
            executor,
            registry,
            state: PredicateState::new(),
            _entity: PhantomData,
        }
    }

    /// Attach the rows of the registered child type named `child_type`.
    ///
    /// A query has at most one join, the last call wins.
    pub fn join(mut self, child_type: impl Into<Cow<'static, str>>) -> Self {
        self.state.join = Some(JoinTarget {
            child_type: child_type.into(),
            model: None,
        });
        self
    }

    /// Attach the rows of `C`, the last call wins.
    pub fn join_entity<C: Entity>(mut self) -> Self {
        let model = C::table();
        self.state.join = Some(JoinTarget {
            child_type: model.type_name.into(),
            model: Some(model),
        });
        self
    }

    /// Add a condition, conditions are conjoined.
    pub fn filter(mut self, condition: impl Expression + 'static) -> Self {
        self.state.filters.push(Box::new(condition));
        self
    }

    pub fn order_by(mut self, field: impl Into<Cow<'static, str>>, order: Order) -> Self {
        self.state.orders.push((field.into(), order));
        self
    }

    /// Sort by an arbitrary expression, written after the field orderings.
    pub fn order_by_expression(mut self, expression: impl Expression + 'static) -> Self {
        self.state.order_expressions.push(Box::new(expression));
        self
    }

    pub fn state(&self) -> &PredicateState {
        &self.state
    }

    /// The select a list operation would run.
    pub fn sql(&self) -> Result<String> {
        let mut query = String::with_capacity(256);
        self.executor.driver().sql_writer().write_select(
            &mut query,
            &SelectKind::All,
            &self.state,
            self.parent_model(),
            self.join_model()?,
        )?;
        Ok(query)
    }

    /// Execute and hydrate at most `limit` parents, `None` or `Some(0)` for all.
    pub fn to_list(self, limit: Option<usize>) -> Result<Vec<E>> {
        let parent = self.parent_model();
        let child = self.join_model()?;
        let hydrator = Hydrator::new(parent).join(child).limit(limit);
        hydrator.check::<E>()?;
        let mut query = String::with_capacity(256);
        self.executor.driver().sql_writer().write_select(
            &mut query,
            &SelectKind::All,
            &self.state,
            parent,
            child,
        )?;
        log::debug!("{}", truncate_long!(query));
        let execution = || QueryError::Execution {
            query: query.clone(),
        };
        let rows = self.executor.fetch(&query).with_context(execution)?;
        hydrator.hydrate(rows.map(|row| row.with_context(execution)))
    }

    /// The first parent, `None` when nothing matches.
    pub fn first(self) -> Result<Option<E>> {
        self.to_list(Some(1)).map(|v| v.into_iter().next())
    }

    /// Number of matching entities, distinct parents when joined.
    pub fn count(self) -> Result<u64> {
        self.scalar(Aggregate::Count)
    }

    /// `T::default()` when nothing matches.
    pub fn max<T: AsValue + Default>(self, field: impl Into<Cow<'static, str>>) -> Result<T> {
        self.scalar(Aggregate::Max(field.into()))
    }

    /// `T::default()` when nothing matches.
    pub fn min<T: AsValue + Default>(self, field: impl Into<Cow<'static, str>>) -> Result<T> {
        self.scalar(Aggregate::Min(field.into()))
    }

    /// `T::default()` when nothing matches.
    pub fn average<T: AsValue + Default>(self, field: impl Into<Cow<'static, str>>) -> Result<T> {
        self.scalar(Aggregate::Average(field.into()))
    }

    /// Delete the matching rows of the table, returns how many were deleted.
    pub fn remove(self) -> Result<u64> {
        let mut query = String::with_capacity(128);
        self.executor.driver().sql_writer().write_delete(
            &mut query,
            &self.state,
            self.parent_model(),
        )?;
        log::debug!("{}", truncate_long!(query));
        let result = self
            .executor
            .execute(&query)
            .with_context(|| QueryError::Execution {
                query: query.clone(),
            })?;
        Ok(result.rows_affected)
    }

    fn scalar<T: AsValue + Default>(self, aggregate: Aggregate) -> Result<T> {
        let mut query = String::with_capacity(128);
        self.executor.driver().sql_writer().write_select(
            &mut query,
            &SelectKind::Aggregate(aggregate),
            &self.state,
            self.parent_model(),
            self.join_model()?,
        )?;
        log::debug!("{}", truncate_long!(query));
        let execution = || QueryError::Execution {
            query: query.clone(),
        };
        let mut rows = self.executor.fetch(&query).with_context(execution)?;
        let value = match rows.next() {
            Some(row) => row
                .with_context(execution)?
                .values
                .into_vec()
                .into_iter()
                .next()
                .unwrap_or_default(),
            None => Value::Null,
        };
        if value.is_null() {
            return Ok(T::default());
        }
        T::try_from_value(value)
    }

    fn parent_model(&self) -> &'d TableModel {
        let registry: &'d Registry = self.registry;
        registry.model_for::<E>().unwrap_or(E::table())
    }

    fn join_model(&self) -> Result<Option<&'d TableModel>> {
        let registry: &'d Registry = self.registry;
        let Some(join) = &self.state.join else {
            return Ok(None);
        };
        if let Some(model) = join.model {
            return Ok(Some(registry.model_like(model).unwrap_or(model)));
        }
        registry
            .model_for_type(&join.child_type)
            .map(Some)
            .ok_or_else(|| {
                QueryError::UnknownType {
                    type_name: join.child_type.to_string(),
                }
                .into()
            })
    }
}
