pub mod alter;
pub mod builders;
pub mod cmd;
pub mod columns;
pub mod conditions;
pub mod joins;
pub mod operators;

pub use self::alter::{AlterOp, AlterOptions, NewColumn, RenameColumn};
pub use self::cmd::{Statement, StatementFile};
pub use self::columns::{
    ColumnDef, ColumnOptions, ColumnRef, DefaultValue, ForeignKey, SelectColumn, UpdateColumn,
};
pub use self::conditions::{DEFAULT_FILTER_COLUMN, Predicate};
pub use self::joins::{InnerJoin, OrderBy, SelectOptions};
pub use self::operators::{ColumnType, Operator, UpdateOperator};
