#[macro_use]
extern crate deferred_gl;

use deferred_gl::utils::prelude::*;

impl_handle!(NamedHandle);

#[test]
fn typed_handles() {
    let mut set = ObjectPool::<NamedHandle, String>::new();

    let e1 = set.create("first".to_owned());
    assert_eq!(format!("{}", e1), "NamedHandle (0, 1)");
    assert_eq!(set.get(e1).map(|v| v.as_str()), Some("first"));

    set.get_mut(e1).unwrap().push_str("-edited");
    assert_eq!(set.get(e1).map(|v| v.as_str()), Some("first-edited"));

    assert!(set.get(NamedHandle::nil()).is_none());
}

#[test]
fn stale_handle() {
    let mut set = ObjectPool::<Handle, i32>::new();
    let e1 = set.create(1);
    assert_eq!(set.free(e1), Some(1));

    let e2 = set.create(2);
    assert_eq!(e1.index(), e2.index());
    assert_eq!(set.get(e1), None);
    assert_eq!(set.get(e2), Some(&2));
    assert!(!set.is_alive(e1));
}

#[test]
fn iterator() {
    let mut set = ObjectPool::<Handle, i32>::new();
    for i in 0..10 {
        set.create(i);
    }

    assert_eq!(set.iter().count(), 10);

    for (i, v) in set.iter().enumerate() {
        assert_eq!(v, Handle::new(i as u32, 1));
        assert_eq!(set.get(v), Some(&(i as i32)));
    }
}
