use std::fmt::{Display, Write};

use proptest::prelude::*;

use crate::{interval::Interval, node::Node};

const BOUND_MAX: usize = 20;

/// Generate arbitrary valid intervals (`low <= high`) with bounds from
/// [0..[`BOUND_MAX`]).
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (0..BOUND_MAX, 0..BOUND_MAX).prop_map(|(a, b)| Interval::new(a.min(b), a.max(b)))
}

/// Generate arbitrary (potentially invalid!) `(low, high)` bounds from
/// [0..[`BOUND_MAX`]).
pub(crate) fn arbitrary_bounds() -> impl Strategy<Value = (usize, usize)> {
    (0..BOUND_MAX, 0..BOUND_MAX)
}

/// Render the subtree rooted at `n` as a Graphviz digraph, used to make
/// structural assertion failures debuggable.
pub(crate) fn print_dot<R, V>(n: &Node<R, V>) -> String
where
    R: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<R, V, W>(n: &Node<R, V>, buf: &mut W)
where
    W: std::fmt::Write,
    R: Display,
{
    // Equal intervals may appear more than once, so node identity is the
    // address.
    let id = n as *const _ as usize;

    writeln!(
        buf,
        r#""{}" [label="{} | {{ max={} | h={} }}"];"#,
        id,
        n.interval(),
        n.subtree_max(),
        n.height(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    id, v as *const _ as usize
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", id).unwrap();
                writeln!(buf, "\"{}\" -> \"null_{}\" [style=invis];", id, id).unwrap();
            }
        };
    }
}
