mod check;
mod column;
mod expr;
mod foreign_key;
mod func;
mod index;
mod pk;
mod realm;
#[allow(clippy::module_inception)]
mod schema;
mod table;
mod ty;
mod view;

pub use check::Check;
pub use column::{Column, GeneratedExpr};
pub use expr::Expr;
pub use foreign_key::{ForeignKey, RefAction};
pub use func::{Func, Proc};
pub use index::{Index, IndexPart, PartKey};
pub use pk::PrimaryKey;
pub use realm::Realm;
pub use schema::{Schema, SchemaId};
pub use table::{Table, TableId};
pub use ty::Type;
pub use view::{DepRef, View, ViewId};
