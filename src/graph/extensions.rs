use crate::graph::{
    amplify::Amplify,
    gain::Gain,
    mix::Mix,
    modulate::Modulate,
    node::{GraphNode, Modulatable},
    offset::StartAt,
    through::Through,
};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn through<E: GraphNode>(self, effect: E) -> Through<Self, E> {
        Through::new(self, effect)
    }

    fn modulate<M: GraphNode>(self, lfo: M, param: Self::Param, depth: f32) -> Modulate<Self, M>
    where
        Self: Modulatable,
    {
        Modulate::new(self, lfo, param, depth)
    }

    fn mix<M: GraphNode>(self, source: M, balance: f32) -> Mix<Self, M> {
        Mix::new(self, source, balance)
    }

    fn gain(self, amount: f32) -> Gain<Self> {
        Gain::new(self, amount)
    }

    fn starting_at(self, delay_secs: f32) -> StartAt<Self> {
        StartAt::new(self, delay_secs)
    }
}

impl<T: GraphNode> NodeExt for T {}
