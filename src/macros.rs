/// Declares schemas, the closed lists of component types stored by a [`Registry`](crate::Registry).
///
/// Each schema expands to an uninhabited type implementing [`Schema`](crate::Schema),
/// a `<Name>Systems` struct holding one [`System`](crate::System) per component type,
/// and a [`Component`](crate::Component) implementation for every listed type
/// with its position in the list as [`Component::INDEX`](crate::Component::INDEX).
///
/// Every component type must be `Send + Sync + 'static`
/// and may appear in the list only once.
///
/// # Options
/// - `index = T`: the unsigned integer type of entity handles and component slots.
///   Defaults to `u32`.
///
/// # Example
/// ```
/// satchel::schema! {
///     /// This is an example schema.
///     /// We can document it and apply attributes on it.
///     #[allow(dead_code)]
///     pub Game { Position, Velocity }
///
///     /// A schema with 16-bit handles.
///     pub Small(index = u16) { Position }
/// }
///
/// struct Position(f32, f32);
/// struct Velocity(f32, f32);
///
/// use satchel::{Component, Schema};
/// assert_eq!(Game::COUNT, 2);
/// assert_eq!(Game::NAMES, ["Position", "Velocity"]);
/// assert_eq!(<Velocity as Component<Game>>::INDEX, 1);
/// assert_eq!(<Position as Component<Small>>::INDEX, 0);
///
/// let mut registry = satchel::Registry::<Small>::new();
/// let entity = registry.create_entity();
/// let _: u16 = entity.raw();
/// ```
///
/// Components that cannot be shared between threads are rejected:
/// ```compile_fail
/// satchel::schema! {
///     pub Game { Shared }
/// }
/// struct Shared(std::rc::Rc<u32>);
/// ```
#[doc(inline)]
pub use satchel_codegen::schema;
