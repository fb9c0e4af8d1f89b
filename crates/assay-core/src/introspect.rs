//! Runtime type model used to discover capabilities structurally.
//!
//! A subject describes itself through [`Reflect::type_info`]: the members it
//! declares directly and the named contracts it satisfies. Members carry their
//! declared shapes alongside an erased invoker, so a caller can both inspect a
//! member's signature and call it without knowing the concrete type.

use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Erased value produced or consumed by an introspected member.
pub type Object = Box<dyn Any>;

/// Lazily resolved descriptor of an introspectable object type.
pub type TypeThunk = fn() -> TypeInfo;

type SharedInvoke = Rc<dyn Fn(&dyn Any, Vec<Object>) -> Option<Object>>;
type ExclusiveInvoke = Rc<dyn Fn(&mut dyn Any, Vec<Object>) -> Option<Object>>;
type Getter = Rc<dyn Fn(&dyn Any) -> Option<Object>>;

/// Runtime identity of a plain value type.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Returns the descriptor for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the underlying type identifier.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the readable type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether a value of `other` may be used where `self` is requested.
    pub fn is_assignable_from(&self, other: &ValueType) -> bool {
        self.id == other.id
    }

    /// Returns whether this descriptor names `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueType({})", self.name)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Structural shape of a member's result.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A plain value of the given type.
    Value(ValueType),
    /// An object whose own members are described by the resolved [`TypeInfo`].
    Object(TypeThunk),
}

impl Shape {
    /// Shape of a plain `T` value.
    pub fn value<T: Any>() -> Self {
        Shape::Value(ValueType::of::<T>())
    }

    /// Returns the value type when the shape is a plain value.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Shape::Value(ty) => Some(*ty),
            Shape::Object(_) => None,
        }
    }

    /// Resolves the object descriptor when the shape is an object.
    pub fn object_type(&self) -> Option<TypeInfo> {
        match self {
            Shape::Object(thunk) => Some(thunk()),
            Shape::Value(_) => None,
        }
    }

    /// Returns whether the shape is a plain `T` value.
    pub fn is_value_of<T: Any>(&self) -> bool {
        self.value_type().is_some_and(|ty| ty.is::<T>())
    }
}

#[derive(Clone)]
enum Invoke {
    Shared(SharedInvoke),
    Exclusive(ExclusiveInvoke),
}

/// Member operation with declared parameter and return shapes.
#[derive(Clone)]
pub struct Method {
    params: Vec<ValueType>,
    returns: Shape,
    invoke: Invoke,
}

impl Method {
    /// Zero-argument operation reading its receiver.
    pub fn new<S, R, F>(f: F) -> Self
    where
        S: Any,
        R: Any,
        F: Fn(&S) -> R + 'static,
    {
        Self {
            params: Vec::new(),
            returns: Shape::value::<R>(),
            invoke: Invoke::Shared(Rc::new(move |receiver: &dyn Any, args: Vec<Object>| {
                if !args.is_empty() {
                    return None;
                }
                let receiver = receiver.downcast_ref::<S>()?;
                Some(Box::new(f(receiver)) as Object)
            })),
        }
    }

    /// Zero-argument operation mutating its receiver.
    pub fn new_mut<S, R, F>(f: F) -> Self
    where
        S: Any,
        R: Any,
        F: Fn(&mut S) -> R + 'static,
    {
        Self {
            params: Vec::new(),
            returns: Shape::value::<R>(),
            invoke: Invoke::Exclusive(Rc::new(
                move |receiver: &mut dyn Any, args: Vec<Object>| {
                    if !args.is_empty() {
                        return None;
                    }
                    let receiver = receiver.downcast_mut::<S>()?;
                    Some(Box::new(f(receiver)) as Object)
                },
            )),
        }
    }

    /// Single-argument operation reading its receiver.
    pub fn with_arg<S, P, R, F>(f: F) -> Self
    where
        S: Any,
        P: Any,
        R: Any,
        F: Fn(&S, P) -> R + 'static,
    {
        Self {
            params: vec![ValueType::of::<P>()],
            returns: Shape::value::<R>(),
            invoke: Invoke::Shared(Rc::new(move |receiver: &dyn Any, mut args: Vec<Object>| {
                if args.len() != 1 {
                    return None;
                }
                let receiver = receiver.downcast_ref::<S>()?;
                let arg = args.pop()?.downcast::<P>().ok()?;
                Some(Box::new(f(receiver, *arg)) as Object)
            })),
        }
    }

    /// Declares the result as an introspectable object described by `ty`.
    pub fn returning(mut self, ty: TypeThunk) -> Self {
        self.returns = Shape::Object(ty);
        self
    }

    /// Declared parameter types.
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Declared result shape.
    pub fn returns(&self) -> Shape {
        self.returns
    }

    /// Returns whether the operation needs exclusive access to its receiver.
    pub fn is_exclusive(&self) -> bool {
        matches!(self.invoke, Invoke::Exclusive(_))
    }

    /// Invokes a shared operation. Exclusive operations yield `None`.
    pub fn invoke(&self, receiver: &dyn Any, args: Vec<Object>) -> Option<Object> {
        match &self.invoke {
            Invoke::Shared(call) => call(receiver, args),
            Invoke::Exclusive(_) => None,
        }
    }

    /// Invokes the operation with exclusive access to the receiver.
    pub fn invoke_mut(&self, receiver: &mut dyn Any, args: Vec<Object>) -> Option<Object> {
        match &self.invoke {
            Invoke::Shared(call) => call(&*receiver, args),
            Invoke::Exclusive(call) => call(receiver, args),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("exclusive", &self.is_exclusive())
            .finish_non_exhaustive()
    }
}

/// Read-only accessor with a declared shape.
#[derive(Clone)]
pub struct Property {
    ty: Shape,
    get: Getter,
}

impl Property {
    /// Accessor reading `T` out of an `S` receiver.
    pub fn new<S, T, F>(f: F) -> Self
    where
        S: Any,
        T: Any,
        F: Fn(&S) -> T + 'static,
    {
        Self {
            ty: Shape::value::<T>(),
            get: Rc::new(move |receiver: &dyn Any| {
                let receiver = receiver.downcast_ref::<S>()?;
                Some(Box::new(f(receiver)) as Object)
            }),
        }
    }

    /// Declares the property value as an introspectable object described by `ty`.
    pub fn returning(mut self, ty: TypeThunk) -> Self {
        self.ty = Shape::Object(ty);
        self
    }

    /// Declared value shape.
    pub fn ty(&self) -> Shape {
        self.ty
    }

    /// Reads the property from `receiver`.
    pub fn get(&self, receiver: &dyn Any) -> Option<Object> {
        (self.get)(receiver)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// What a member is.
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// Callable operation.
    Method(Method),
    /// Read-only accessor.
    Property(Property),
}

/// Named member declared by a type or a contract.
#[derive(Debug, Clone)]
pub struct Member {
    name: Cow<'static, str>,
    kind: MemberKind,
}

impl Member {
    /// Declares a method member.
    pub fn method(name: impl Into<Cow<'static, str>>, method: Method) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method(method),
        }
    }

    /// Declares a property member.
    pub fn property(name: impl Into<Cow<'static, str>>, property: Property) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property(property),
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member kind.
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Returns the method when the member is one.
    pub fn as_method(&self) -> Option<&Method> {
        match &self.kind {
            MemberKind::Method(method) => Some(method),
            MemberKind::Property(_) => None,
        }
    }

    /// Returns the property when the member is one.
    pub fn as_property(&self) -> Option<&Property> {
        match &self.kind {
            MemberKind::Property(property) => Some(property),
            MemberKind::Method(_) => None,
        }
    }
}

/// Separately named contract satisfied by a type.
#[derive(Debug, Clone)]
pub struct ContractInfo {
    name: Cow<'static, str>,
    element: ValueType,
    base: Option<Cow<'static, str>>,
    members: Vec<Member>,
}

impl ContractInfo {
    /// Creates a contract asserting elements of type `element`.
    pub fn new(name: impl Into<Cow<'static, str>>, element: ValueType) -> Self {
        Self {
            name: name.into(),
            element,
            base: None,
            members: Vec::new(),
        }
    }

    /// Marks this contract as a refinement of the contract named `base`.
    pub fn refines(mut self, base: impl Into<Cow<'static, str>>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds a member implemented for this contract.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Contract name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type asserted by the contract.
    pub fn element(&self) -> ValueType {
        self.element
    }

    /// Name of the refined base contract, if any.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Members declared directly by this contract.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member declared directly by this contract.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name() == name)
    }
}

/// Runtime descriptor of a type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    name: Cow<'static, str>,
    members: Vec<Member>,
    contracts: Vec<ContractInfo>,
}

impl TypeInfo {
    /// Creates an empty descriptor.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            contracts: Vec::new(),
        }
    }

    /// Creates an empty descriptor named after `T`.
    pub fn of<T: Any>() -> Self {
        Self::new(type_name::<T>())
    }

    /// Adds a member declared directly by the type.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a satisfied contract.
    pub fn with_contract(mut self, contract: ContractInfo) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members declared directly by the type.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member declared directly by the type.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name() == name)
    }

    /// Satisfied contracts in the order the type reports them.
    pub fn contracts(&self) -> &[ContractInfo] {
        &self.contracts
    }

    /// Looks up a satisfied contract by name.
    pub fn contract(&self, name: &str) -> Option<&ContractInfo> {
        self.contracts.iter().find(|contract| contract.name() == name)
    }

    /// Looks up `name` on `contract`, then along its refinement chain.
    pub fn contract_member<'a>(
        &'a self,
        contract: &'a ContractInfo,
        name: &str,
    ) -> Option<&'a Member> {
        let mut current = contract;
        // A refinement chain can never be longer than the contract list.
        for _ in 0..=self.contracts.len() {
            if let Some(member) = current.member(name) {
                return Some(member);
            }
            current = self.contract(current.base()?)?;
        }
        None
    }
}

/// Values that can describe their own runtime type.
pub trait Reflect: Any {
    /// Returns the descriptor of the value's runtime type.
    fn type_info(&self) -> TypeInfo;
}
